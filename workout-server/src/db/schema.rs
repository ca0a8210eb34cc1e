//! Schema creation for the athlete tables
//!
//! Idempotent: every statement is `IF NOT EXISTS`.

use sqlx::SqlitePool;

/// Ensure all tables and indexes exist.
pub async fn ensure(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring database schema...");

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS centros_treinamento (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categorias (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS atletas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL,
            nome_busca TEXT NOT NULL,
            cpf TEXT NOT NULL UNIQUE,
            centro_treinamento_id INTEGER NOT NULL REFERENCES centros_treinamento(id),
            categoria_id INTEGER NOT NULL REFERENCES categorias(id)
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_atletas_centro ON atletas(centro_treinamento_id)",
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_atletas_categoria ON atletas(categoria_id)")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!("Database schema ready");
    Ok(())
}
