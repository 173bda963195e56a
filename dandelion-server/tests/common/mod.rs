//! Shared fixtures for database-backed tests
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p dandelion-server -- --ignored

#![allow(dead_code)]

use dandelion_server::db::{self, migrate};
use once_cell::sync::Lazy;
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};
use tracing_subscriber::EnvFilter;

/// Tests truncate shared tables, so they take turns.
static DB_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub struct TestDb {
    pub pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

/// Route library logs through the test harness (RUST_LOG overrides).
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Connect, migrate and empty both tables.
pub async fn setup() -> TestDb {
    init_tracing();
    let guard = DB_LOCK.lock().await;

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = db::create_pool(&url).await.expect("pool creation failed");

    migrate::run(&pool).await.expect("migration failed");

    sqlx::query("TRUNCATE TABLE comment, posts RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("truncate failed");

    TestDb {
        pool,
        _guard: guard,
    }
}

/// Insert the two fixture posts with fixed ids.
pub async fn seed_posts(pool: &PgPool) {
    sqlx::query(
        r#"
        INSERT INTO posts (id, title, body)
        VALUES ($1, $2, $3), ($4, $5, $6)
        "#,
    )
    .bind(1)
    .bind("Sunken ship")
    .bind("There is a ship called Titanic")
    .bind(2)
    .bind("Fallen angels")
    .bind("The sky is clear today..")
    .execute(pool)
    .await
    .expect("seeding posts failed");
}
