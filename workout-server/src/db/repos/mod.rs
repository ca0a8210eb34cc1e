//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs to project parent names (no N+1)
//! - Relies on DB constraints and maps violations (no check-then-insert for uniqueness)
//! - Uses transactions for writes, dropped uncommitted on any error

pub mod athletes;
pub mod catalog;

pub use athletes::{AthleteFilter, AthleteRepo, AthleteView};
pub use catalog::{Catalog, CatalogEntry, CatalogRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Já existe um atleta cadastrado com o cpf: {0}")]
    DuplicateIdentity(String),

    #[error("{resource} '{id}' not found")]
    ReferenceNotFound { resource: &'static str, id: String },
}
