//! Schema migration command

use anyhow::Result;
use clap::Parser;

use super::{connect_and_migrate, DatabaseArgs};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Apply migrations and close the pool
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = connect_and_migrate(&args.db).await?;
    pool.close().await;
    tracing::info!("Database schema is up to date");
    Ok(())
}
