//! Database connection pool management
//!
//! Uses sqlx SqlitePool with explicit connection limits. Every connection
//! enforces foreign keys.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default connection string: a file next to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://atletas.db";

/// Create a SQLite connection pool.
///
/// The database file is created if it does not exist.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("sqlite://atletas.db").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a SQLite connection pool with custom options.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Create a pool over a private in-memory database.
///
/// Limited to a single connection that is never recycled: each SQLite
/// in-memory connection is its own database.
pub async fn create_in_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}
