//! Startup seeding of training centers and categories

use sqlx::SqlitePool;

use super::repos::catalog::{self, Catalog};
use super::repos::DbError;

/// Training centers inserted into an empty store
pub const TRAINING_CENTERS: [&str; 3] = ["CT Rio de Janeiro", "CT São Paulo", "CT Minas Gerais"];

/// Categories inserted into an empty store
pub const CATEGORIES: [&str; 3] = ["Junior", "Pleno", "Sênior"];

/// Rows inserted by a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub training_centers: u64,
    pub categories: u64,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.training_centers == 0 && self.categories == 0
    }
}

/// Populate the lookup tables when no training center exists yet.
///
/// Only the training center table is checked; rows are inserted without
/// per-row existence checks.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<SeedReport, DbError> {
    let mut tx = pool.begin().await?;

    if catalog::count(&mut tx, Catalog::TrainingCenters).await? > 0 {
        tracing::debug!("Store already seeded, skipping");
        return Ok(SeedReport::default());
    }

    let report = SeedReport {
        training_centers: catalog::insert_names(&mut tx, Catalog::TrainingCenters, &TRAINING_CENTERS)
            .await?,
        categories: catalog::insert_names(&mut tx, Catalog::Categories, &CATEGORIES).await?,
    };

    tx.commit().await?;

    tracing::info!(
        training_centers = report.training_centers,
        categories = report.categories,
        "Seeded lookup tables"
    );
    Ok(report)
}
