//! HTTP server command
//!
//! Connects, migrates, then serves until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use dandelion_server::http::{run_server, ServerConfig};

use super::{connect_and_migrate, DatabaseArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Seconds allowed to read a request body
    #[arg(long, default_value_t = 5)]
    pub read_timeout: u64,

    /// Seconds allowed to handle a request
    #[arg(long, default_value_t = 10)]
    pub write_timeout: u64,

    /// Seconds in-flight requests may run after a shutdown signal
    #[arg(long, default_value_t = 5)]
    pub shutdown_timeout: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            read_timeout: Duration::from_secs(self.read_timeout),
            write_timeout: Duration::from_secs(self.write_timeout),
            shutdown_timeout: Duration::from_secs(self.shutdown_timeout),
            cors_permissive: self.cors_permissive,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting dandelion server on {}", args.bind);

    let pool = connect_and_migrate(&args.db).await?;

    // Blocks until shutdown
    run_server(pool, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn defaults_match_server_config() {
        let harness = Harness::parse_from(["dandelion", "--database-url", "postgres://db/test"]);
        let config = harness.serve.server_config();
        let defaults = ServerConfig::default();

        assert_eq!(config.bind_addr, defaults.bind_addr);
        assert_eq!(config.read_timeout, defaults.read_timeout);
        assert_eq!(config.write_timeout, defaults.write_timeout);
        assert_eq!(config.shutdown_timeout, defaults.shutdown_timeout);
        assert_eq!(harness.serve.db.database_url, "postgres://db/test");
        assert_eq!(harness.serve.db.migrate_timeout, 10);
    }

    #[test]
    fn overrides_apply() {
        let harness = Harness::parse_from([
            "dandelion",
            "--bind",
            "127.0.0.1:9000",
            "--write-timeout",
            "30",
            "--cors-permissive",
        ]);
        let config = harness.serve.server_config();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.write_timeout, Duration::from_secs(30));
        assert!(config.cors_permissive);
    }
}
