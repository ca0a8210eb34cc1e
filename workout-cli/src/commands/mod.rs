//! Command implementations for the workout CLI

pub mod migrate;
pub mod serve;

pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{Context, Result};
use clap::Args;
use workout_server::db::{create_pool_with_options, pool, SqlitePool};
use workout_server::SeedReport;

/// Store connection options shared by every command
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database URL (SQLite connection string)
    #[arg(long, env = "DATABASE_URL", default_value = pool::DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, default_value_t = pool::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

/// Open the pool, create the schema and seed an empty store.
pub(crate) async fn open_store(args: &DatabaseArgs) -> Result<(SqlitePool, SeedReport)> {
    let pool = create_pool_with_options(&args.database_url, args.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", args.database_url))?;

    let report = workout_server::prepare_store(&pool)
        .await
        .context("Failed to prepare database")?;

    Ok((pool, report))
}
