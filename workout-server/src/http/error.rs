//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::{ValidationError, ValidationErrors};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request shape is wrong (422, with field detail)
    Validation(ValidationErrors),

    /// Identity number already registered (409, or 303 in legacy mode)
    DuplicateIdentity {
        identity_number: String,
        status: StatusCode,
    },

    /// Body references a training center or category that does not exist (422)
    ReferenceNotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    /// Map a repository error, answering duplicates with `duplicate_status`.
    pub fn from_db(e: DbError, duplicate_status: StatusCode) -> Self {
        match e {
            DbError::DuplicateIdentity(identity_number) => Self::DuplicateIdentity {
                identity_number,
                status: duplicate_status,
            },
            DbError::ReferenceNotFound { resource, id } => Self::ReferenceNotFound { resource, id },
            DbError::Sqlx(_) => Self::Database(e),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::ReferenceNotFound { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::DuplicateIdentity { status, .. } => *status,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(e) => json!({
                "error": "validation_error",
                "message": e.to_string(),
                "detail": e.details(),
            }),
            Self::DuplicateIdentity {
                identity_number, ..
            } => {
                tracing::warn!(cpf = %identity_number, "Rejected duplicate identity number");
                json!({
                    "error": "duplicate_identity",
                    "message": DbError::DuplicateIdentity(identity_number.clone()).to_string(),
                })
            }
            Self::ReferenceNotFound { resource, id } => json!({
                "error": "reference_not_found",
                "message": format!("{} '{}' not found", resource, id),
            }),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.into())
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::from_db(e, StatusCode::CONFLICT)
    }
}
