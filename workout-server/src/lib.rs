//! workout-server: athlete registry over HTTP
//!
//! Stores athletes, training centers and categories in SQLite and exposes
//! a filtered, paginated listing plus athlete registration.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, SeedReport};
pub use http::{build_router, run_server, AppState, DuplicateStatus, ServerConfig};

/// Create tables if needed and seed the lookup tables on an empty store.
pub async fn prepare_store(pool: &sqlx::SqlitePool) -> Result<SeedReport, db::DbError> {
    db::schema::ensure(pool).await?;
    db::seed_if_empty(pool).await
}
