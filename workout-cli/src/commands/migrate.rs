//! Schema and seed command
//!
//! Creates the tables and seeds an empty store without starting the server.

use anyhow::Result;
use clap::Parser;

use super::{open_store, DatabaseArgs};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let (pool, report) = open_store(&args.database).await?;
    pool.close().await;

    println!(
        "Schema ready at {} (seeded {} training centers, {} categories)",
        args.database.database_url, report.training_centers, report.categories
    );
    Ok(())
}
