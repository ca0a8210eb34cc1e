//! Store health check
//!
//! `GET /health` runs a trivial query on the pool: 200 when the store answers,
//! 503 when it does not.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status) = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_in_memory_pool;

    #[tokio::test]
    async fn open_store_is_healthy() {
        let pool = create_in_memory_pool().await.unwrap();
        let state = Arc::new(AppState::new(pool));

        let (code, Json(body)) = health(State(state)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn closed_store_is_unavailable() {
        let pool = create_in_memory_pool().await.unwrap();
        pool.close().await;
        let state = Arc::new(AppState::new(pool));

        let (code, Json(body)) = health(State(state)).await;
        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "unavailable");
    }
}
