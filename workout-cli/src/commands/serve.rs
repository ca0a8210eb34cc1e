//! HTTP server command
//!
//! Prepares the store and runs the athlete API until shutdown.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use workout_server::{run_server, DuplicateStatus, ServerConfig};

use super::{open_store, DatabaseArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Answer duplicate CPFs with 303 See Other instead of 409 Conflict
    #[arg(long)]
    pub legacy_duplicate_status: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            duplicate_status: if self.legacy_duplicate_status {
                DuplicateStatus::Legacy
            } else {
                DuplicateStatus::Conflict
            },
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting workout server on {}", args.bind);

    let (pool, report) = open_store(&args.database).await?;
    if report.is_empty() {
        tracing::info!("Store already seeded");
    }

    // Run server (blocks until shutdown)
    run_server(pool, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}
