//! Custom Axum extractors
//!
//! Rejections from axum's own extractors are turned into validation errors
//! so every malformed request gets the same 422 body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// `<summary>: <field>: <serde message>` as rendered for JSON data errors
static FIELD_ERROR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^:]+: (?P<field>[A-Za-z_][A-Za-z0-9_]*): (?P<reason>.+)$")
        .expect("invalid field error regex")
});

/// A JSON request body with named top-level fields
pub trait RequestBody: DeserializeOwned {
    /// Wire names of the fields, used to attribute decode errors
    const FIELDS: &'static [&'static str];
}

/// JSON body extractor that rejects with a validation error
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: RequestBody,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::from(body_error(&rejection, T::FIELDS)))?;

        Ok(Self(value))
    }
}

/// Attribute a body rejection to one of `fields` when serde names it,
/// otherwise to the body as a whole.
fn body_error(rejection: &JsonRejection, fields: &[&'static str]) -> ValidationError {
    let text = rejection.body_text();

    if let JsonRejection::JsonDataError(_) = rejection {
        if let Some(caps) = FIELD_ERROR_RE.captures(&text) {
            if let Some(field) = fields.iter().copied().find(|f| *f == &caps["field"]) {
                return ValidationError::Malformed {
                    field,
                    reason: caps["reason"].to_owned(),
                };
            }
        }
    }

    ValidationError::Malformed {
        field: "body",
        reason: text,
    }
}

/// Query string extractor that rejects with a validation error
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::from(ValidationError::Malformed {
                    field: "query",
                    reason: rejection.body_text(),
                })
            })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Pair {
        left: Option<String>,
        right: Option<i64>,
    }

    impl RequestBody for Pair {
        const FIELDS: &'static [&'static str] = &["left", "right"];
    }

    async fn extract(body: &'static str) -> Result<Pair, ValidationError> {
        let request = Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        match Json::<Pair>::from_request(request, &()).await {
            Ok(Json(pair)) => Ok(pair),
            Err(rejection) => Err(body_error(&rejection, Pair::FIELDS)),
        }
    }

    #[tokio::test]
    async fn type_error_names_the_field() {
        let err = extract(r#"{"left": "a", "right": "b"}"#).await.unwrap_err();
        assert_eq!(err.field(), "right");
        assert!(err.to_string().contains("invalid type"));
    }

    #[tokio::test]
    async fn syntax_error_blames_the_body() {
        let err = extract(r#"{"left": "#).await.unwrap_err();
        assert_eq!(err.field(), "body");
    }

    #[tokio::test]
    async fn non_object_blames_the_body() {
        let err = extract("[1, 2]").await.unwrap_err();
        assert_eq!(err.field(), "body");
    }

    #[tokio::test]
    async fn absent_fields_decode_as_none() {
        let pair = extract("{}").await.unwrap();
        assert!(pair.left.is_none() && pair.right.is_none());
    }
}
