//! Database layer - connection pool, schema, seeding and repositories
//!
//! # Design Principles
//!
//! - Connection pool, handed to handlers through state - no global handle
//! - List operations use JOINs for parent names - no N+1 queries
//! - Rely on DB constraints, map violations - no check-then-insert for uniqueness
//! - Transactions for every write

pub mod pool;
pub mod repos;
pub mod schema;
pub mod seed;

pub use pool::{create_in_memory_pool, create_pool, create_pool_with_options};
pub use repos::*;
pub use seed::{seed_if_empty, SeedReport};
pub use sqlx::SqlitePool;
