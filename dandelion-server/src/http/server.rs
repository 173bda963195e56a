//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Body read timeout and overall handling timeout
//! - Graceful shutdown on SIGTERM/Ctrl+C, bounded by a grace period

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::cors::CorsLayer;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

use super::routes;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,

    /// Maximum time to receive a request body
    pub read_timeout: Duration,

    /// Maximum time to handle a request and produce the response
    pub write_timeout: Duration,

    /// How long in-flight requests may run after a shutdown signal
    pub shutdown_timeout: Duration,

    /// Allow permissive CORS (default: false = no cross-origin access)
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            read_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(10),
            shutdown_timeout: Duration::from_secs(5),
            cors_permissive: false,
        }
    }
}

/// Shared application state, handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the router with all routes and middleware.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .merge(routes::health::router())
        .merge(routes::posts::router())
        .merge(routes::comments::router())
        .layer(RequestBodyTimeoutLayer::new(config.read_timeout))
        .layer(TimeoutLayer::new(config.write_timeout))
        .layer(TraceLayer::new_for_http());

    if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        app = app.layer(CorsLayer::permissive());
    }

    app.with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(AppState::new(pool.clone()), &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    serve_until(listener, app, pool, shutdown_signal(), config.shutdown_timeout).await
}

/// Serve until `signal` resolves, then give in-flight requests `grace` to
/// finish.
///
/// Requests still running when the grace period ends are abandoned: their
/// connection tasks keep their pooled connections, so the pool is only closed
/// after a complete drain.
async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    pool: PgPool,
    signal: F,
    grace: Duration,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown = Arc::new(Notify::new());
    let trigger = Arc::clone(&shutdown);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        signal.await;
        trigger.notify_one();
    });

    let drained = tokio::select! {
        result = server.into_future() => {
            result?;
            true
        }
        _ = async {
            shutdown.notified().await;
            tokio::time::sleep(grace).await;
        } => false,
    };

    if drained {
        pool.close().await;
    } else {
        tracing::warn!(
            grace_ms = grace.as_millis() as u64,
            "Shutdown grace period elapsed, abandoning in-flight requests"
        );
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
