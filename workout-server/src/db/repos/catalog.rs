//! Training center and category tables
//!
//! Both are plain `(id, nome)` lookup tables, seeded at startup and
//! read-only afterwards, so they share one repository.

use sqlx::{FromRow, SqliteConnection, SqlitePool};

use super::DbError;

/// Which lookup table to address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    TrainingCenters,
    Categories,
}

impl Catalog {
    pub fn table(self) -> &'static str {
        match self {
            Self::TrainingCenters => "centros_treinamento",
            Self::Categories => "categorias",
        }
    }

    /// Human readable name used in error messages.
    pub fn resource(self) -> &'static str {
        match self {
            Self::TrainingCenters => "training center",
            Self::Categories => "category",
        }
    }
}

/// Lookup row
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CatalogEntry {
    pub id: i64,
    #[sqlx(rename = "nome")]
    pub name: String,
}

/// Read access to a lookup table
pub struct CatalogRepo<'a> {
    pool: &'a SqlitePool,
    catalog: Catalog,
}

impl<'a> CatalogRepo<'a> {
    pub fn new(pool: &'a SqlitePool, catalog: Catalog) -> Self {
        Self { pool, catalog }
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let mut conn = self.pool.acquire().await?;
        count(&mut conn, self.catalog).await
    }

    /// All rows ordered by id.
    pub async fn list(&self) -> Result<Vec<CatalogEntry>, DbError> {
        let sql = format!("SELECT id, nome FROM {} ORDER BY id", self.catalog.table());
        let rows = sqlx::query_as::<_, CatalogEntry>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }
}

pub(crate) async fn count(conn: &mut SqliteConnection, catalog: Catalog) -> Result<i64, DbError> {
    let sql = format!("SELECT COUNT(*) FROM {}", catalog.table());
    let (total,): (i64,) = sqlx::query_as(&sql).fetch_one(conn).await?;
    Ok(total)
}

pub(crate) async fn exists(
    conn: &mut SqliteConnection,
    catalog: Catalog,
    id: i64,
) -> Result<bool, DbError> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", catalog.table());
    let (found,): (bool,) = sqlx::query_as(&sql).bind(id).fetch_one(conn).await?;
    Ok(found)
}

/// Insert each name as a new row, returning the number inserted.
pub(crate) async fn insert_names(
    conn: &mut SqliteConnection,
    catalog: Catalog,
    names: &[&str],
) -> Result<u64, DbError> {
    let sql = format!("INSERT INTO {} (nome) VALUES (?)", catalog.table());
    let mut inserted = 0;
    for name in names {
        inserted += sqlx::query(&sql)
            .bind(*name)
            .execute(&mut *conn)
            .await?
            .rows_affected();
    }
    Ok(inserted)
}
