//! Athlete repository
//!
//! - list: filtered, paginated, parent names resolved with JOINs
//! - create: single transaction; duplicate CPF and missing parents are
//!   reported as typed errors and leave the table untouched

use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use super::catalog::{self, Catalog};
use super::DbError;
use crate::models::{NewAthlete, Paginated, Pagination};

const SELECT_VIEW: &str = r#"
    SELECT
        a.id,
        a.nome AS name,
        a.cpf AS identity_number,
        ct.nome AS training_center,
        c.nome AS category
    FROM atletas a
    JOIN centros_treinamento ct ON ct.id = a.centro_treinamento_id
    JOIN categorias c ON c.id = a.categoria_id
    WHERE 1 = 1
"#;

/// Athlete with its parent names resolved
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AthleteView {
    pub id: i64,
    pub name: String,
    pub identity_number: String,
    pub training_center: String,
    pub category: String,
}

/// List filters. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AthleteFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Exact identity number
    pub identity_number: Option<String>,
}

impl AthleteFilter {
    pub fn new(name: Option<String>, identity_number: Option<String>) -> Self {
        Self {
            name: name.filter(|s| !s.is_empty()),
            identity_number: identity_number.filter(|s| !s.is_empty()),
        }
    }

    /// LIKE pattern over the folded name column, wildcards escaped.
    fn name_pattern(&self) -> Option<String> {
        self.name.as_ref().map(|name| {
            let mut pattern = String::with_capacity(name.len() + 2);
            pattern.push('%');
            for ch in name.to_lowercase().chars() {
                if matches!(ch, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(ch);
            }
            pattern.push('%');
            pattern
        })
    }

    fn push_conditions(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        if let Some(pattern) = self.name_pattern() {
            qb.push(" AND a.nome_busca LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\'");
        }
        if let Some(cpf) = &self.identity_number {
            qb.push(" AND a.cpf = ").push_bind(cpf.clone());
        }
    }
}

/// Athlete repository
pub struct AthleteRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AthleteRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List athletes matching `filter`, ordered by id.
    ///
    /// Count and page queries share one connection.
    pub async fn list(
        &self,
        filter: &AthleteFilter,
        page: Pagination,
    ) -> Result<Paginated<AthleteView>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let mut count_query: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM atletas a WHERE 1 = 1");
        filter.push_conditions(&mut count_query);
        let (total,): (i64,) = count_query
            .build_query_as()
            .fetch_one(&mut *conn)
            .await?;

        let mut page_query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(SELECT_VIEW);
        filter.push_conditions(&mut page_query);
        page_query
            .push(" ORDER BY a.id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let items = page_query
            .build_query_as::<AthleteView>()
            .fetch_all(&mut *conn)
            .await?;

        Ok(Paginated::new(items, total, page))
    }

    /// Insert a new athlete and return it with parent names.
    ///
    /// The INSERT runs first so the transaction holds the write lock before
    /// any read; concurrent creates wait on the busy timeout.
    pub async fn create(&self, athlete: &NewAthlete) -> Result<AthleteView, DbError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO atletas (nome, nome_busca, cpf, centro_treinamento_id, categoria_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(athlete.name.as_str())
        .bind(athlete.name.folded())
        .bind(athlete.identity_number.as_str())
        .bind(athlete.training_center_id)
        .bind(athlete.category_id)
        .execute(&mut *tx)
        .await;

        let id = match inserted {
            Ok(done) => done.last_insert_rowid(),
            Err(e) => return Err(insert_error(&mut tx, e, athlete).await),
        };

        let view = sqlx::query_as::<_, AthleteView>(&format!("{SELECT_VIEW} AND a.id = ?"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(view)
    }

    /// Total number of athletes.
    pub async fn count(&self) -> Result<i64, DbError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM atletas")
            .fetch_one(self.pool)
            .await?;
        Ok(total)
    }
}

/// Translate a failed INSERT into a typed error.
async fn insert_error(
    conn: &mut SqliteConnection,
    err: sqlx::Error,
    athlete: &NewAthlete,
) -> DbError {
    let (unique, foreign_key) = match &err {
        sqlx::Error::Database(db_err) => (
            db_err.is_unique_violation(),
            db_err.is_foreign_key_violation(),
        ),
        _ => (false, false),
    };

    if unique {
        return DbError::DuplicateIdentity(athlete.identity_number.as_str().to_owned());
    }
    if foreign_key {
        return match missing_reference(conn, athlete).await {
            Ok(Some(missing)) => missing,
            Ok(None) => DbError::Sqlx(err),
            Err(lookup) => lookup,
        };
    }
    DbError::Sqlx(err)
}

/// Find which parent row an athlete points at but does not exist.
async fn missing_reference(
    conn: &mut SqliteConnection,
    athlete: &NewAthlete,
) -> Result<Option<DbError>, DbError> {
    for (catalog, id) in [
        (Catalog::TrainingCenters, athlete.training_center_id),
        (Catalog::Categories, athlete.category_id),
    ] {
        if !catalog::exists(&mut *conn, catalog, id).await? {
            return Ok(Some(DbError::ReferenceNotFound {
                resource: catalog.resource(),
                id: id.to_string(),
            }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_in_memory_pool, schema, seed};
    use crate::models::{AthleteName, IdentityNumber};

    async fn seeded_pool() -> SqlitePool {
        let pool = create_in_memory_pool().await.unwrap();
        schema::ensure(&pool).await.unwrap();
        seed::seed_if_empty(&pool).await.unwrap();
        pool
    }

    fn athlete(name: &str, cpf: &str) -> NewAthlete {
        NewAthlete {
            name: AthleteName::new(name).unwrap(),
            identity_number: IdentityNumber::new(cpf).unwrap(),
            training_center_id: 1,
            category_id: 1,
        }
    }

    #[test]
    fn empty_filters_are_absent() {
        let filter = AthleteFilter::new(Some(String::new()), Some(String::new()));
        assert_eq!(filter, AthleteFilter::default());
    }

    #[test]
    fn name_pattern_escapes_wildcards() {
        let filter = AthleteFilter::new(Some("A_b%\\".into()), None);
        assert_eq!(filter.name_pattern().unwrap(), "%a\\_b\\%\\\\%");
    }

    #[tokio::test]
    async fn create_resolves_parent_names() {
        let pool = seeded_pool().await;
        let view = AthleteRepo::new(&pool)
            .create(&athlete("João", "123"))
            .await
            .unwrap();
        assert_eq!(view.name, "João");
        assert_eq!(view.identity_number, "123");
        assert_eq!(view.training_center, "CT Rio de Janeiro");
        assert_eq!(view.category, "Junior");
    }

    #[tokio::test]
    async fn duplicate_identity_is_rejected() {
        let pool = seeded_pool().await;
        let repo = AthleteRepo::new(&pool);
        repo.create(&athlete("João", "123")).await.unwrap();

        let err = repo.create(&athlete("Outro", "123")).await.unwrap_err();
        assert!(matches!(err, DbError::DuplicateIdentity(ref cpf) if cpf == "123"));
        assert!(err.to_string().contains("123"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_training_center_is_rejected() {
        let pool = seeded_pool().await;
        let repo = AthleteRepo::new(&pool);
        let mut new = athlete("João", "123");
        new.training_center_id = 4;

        let err = repo.create(&new).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::ReferenceNotFound { resource: "training center", ref id } if id == "4"
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_category_is_rejected() {
        let pool = seeded_pool().await;
        let repo = AthleteRepo::new(&pool);
        let mut new = athlete("João", "123");
        new.category_id = 99;

        let err = repo.create(&new).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::ReferenceNotFound { resource: "category", ref id } if id == "99"
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn name_filter_ignores_case() {
        let pool = seeded_pool().await;
        let repo = AthleteRepo::new(&pool);
        for (name, cpf) in [("João", "1"), ("Jonas", "2"), ("Maria", "3"), ("JOÃO", "4")] {
            repo.create(&athlete(name, cpf)).await.unwrap();
        }

        let page = repo
            .list(&AthleteFilter::new(Some("jo".into()), None), Pagination::default())
            .await
            .unwrap();
        let names: Vec<_> = page.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["João", "Jonas", "JOÃO"]);
        assert_eq!(page.total, 3);

        let page = repo
            .list(&AthleteFilter::new(Some("ão".into()), None), Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn filters_combine() {
        let pool = seeded_pool().await;
        let repo = AthleteRepo::new(&pool);
        repo.create(&athlete("João", "1")).await.unwrap();
        repo.create(&athlete("Jonas", "2")).await.unwrap();

        let both = AthleteFilter::new(Some("jo".into()), Some("2".into()));
        let page = repo.list(&both, Pagination::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Jonas");

        let none = AthleteFilter::new(Some("maria".into()), Some("2".into()));
        let page = repo.list(&none, Pagination::default()).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.pages, 0);
    }
}
