//! Athlete endpoints
//!
//! `GET /atletas` lists with `nome` / `cpf` filters and pagination,
//! `POST /atletas` registers a new athlete.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{AthleteFilter, AthleteRepo, AthleteView};
use crate::http::error::ApiError;
use crate::http::extractors::{RequestBody, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::{
    AthleteName, IdentityNumber, NewAthlete, Paginated, Pagination, PaginationParams,
    ValidationError, ValidationErrors,
};

/// Create athlete request
///
/// Every field is optional at decode time so that all missing fields are
/// reported together by [`CreateAthleteRequest::validate`].
#[derive(Debug, Default, Deserialize)]
pub struct CreateAthleteRequest {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub centro_treinamento_id: Option<i64>,
    pub categoria_id: Option<i64>,
}

impl RequestBody for CreateAthleteRequest {
    const FIELDS: &'static [&'static str] =
        &["nome", "cpf", "centro_treinamento_id", "categoria_id"];
}

impl CreateAthleteRequest {
    /// Check every field, collecting all errors.
    pub fn validate(self) -> Result<NewAthlete, ValidationErrors> {
        let mut errors = Vec::new();

        let name = check(self.nome, "nome", &mut errors, |s| AthleteName::new(&s));
        let identity_number = check(self.cpf, "cpf", &mut errors, |s| IdentityNumber::new(&s));
        let training_center_id = check(
            self.centro_treinamento_id,
            "centro_treinamento_id",
            &mut errors,
            Ok,
        );
        let category_id = check(self.categoria_id, "categoria_id", &mut errors, Ok);

        match (name, identity_number, training_center_id, category_id) {
            (Some(name), Some(identity_number), Some(training_center_id), Some(category_id)) => {
                Ok(NewAthlete {
                    name,
                    identity_number,
                    training_center_id,
                    category_id,
                })
            }
            _ => Err(ValidationErrors::new(errors)),
        }
    }
}

fn check<T, U>(
    value: Option<T>,
    field: &'static str,
    errors: &mut Vec<ValidationError>,
    validate: impl FnOnce(T) -> Result<U, ValidationError>,
) -> Option<U> {
    match value.ok_or(ValidationError::Missing { field }).and_then(validate) {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

/// List query parameters
#[derive(Debug, Default, Deserialize)]
pub struct AthleteQuery {
    /// Case-insensitive substring of the athlete name
    pub nome: Option<String>,
    /// Exact identity number
    pub cpf: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl AthleteQuery {
    fn into_parts(self) -> (AthleteFilter, Pagination) {
        let page = Pagination::from(PaginationParams {
            page: self.page,
            size: self.size,
        });
        (AthleteFilter::new(self.nome, self.cpf), page)
    }
}

/// `{nome}` projection shared by training centers and categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResponse {
    pub nome: String,
}

/// Athlete response. Ids and the identity number are not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteResponse {
    pub nome: String,
    pub centro_treinamento: NamedResponse,
    pub categoria: NamedResponse,
}

impl From<AthleteView> for AthleteResponse {
    fn from(a: AthleteView) -> Self {
        Self {
            nome: a.name,
            centro_treinamento: NamedResponse {
                nome: a.training_center,
            },
            categoria: NamedResponse { nome: a.category },
        }
    }
}

/// GET /atletas - list athletes with filters and pagination
async fn list_athletes(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<AthleteQuery>,
) -> Result<Json<Paginated<AthleteResponse>>, ApiError> {
    let (filter, page) = query.into_parts();
    let result = AthleteRepo::new(&state.pool).list(&filter, page).await?;

    Ok(Json(result.map(AthleteResponse::from)))
}

/// POST /atletas - register a new athlete
async fn create_athlete(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateAthleteRequest>,
) -> Result<(StatusCode, Json<AthleteResponse>), ApiError> {
    let athlete = req.validate()?;
    let created = AthleteRepo::new(&state.pool)
        .create(&athlete)
        .await
        .map_err(|e| ApiError::from_db(e, state.duplicate_status.status_code()))?;

    tracing::info!(id = created.id, "Registered athlete");
    Ok((StatusCode::CREATED, Json(AthleteResponse::from(created))))
}

/// Athlete routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/atletas", get(list_athletes).post(create_athlete))
}
