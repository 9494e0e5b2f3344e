use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::error::{ParseErrorKind, SieveError};
use crate::interface::Analyzer;
use crate::predicate::FilterParams;

#[derive(Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Deserialize)]
pub struct NaturalRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

/// Transport status for an engine error.
pub fn status_for(error: &SieveError) -> StatusCode {
    match error {
        SieveError::InvalidParameter { .. } | SieveError::MissingValue => StatusCode::BAD_REQUEST,
        SieveError::Parse(e) => match e.kind() {
            ParseErrorKind::Empty | ParseErrorKind::Unrecognized => StatusCode::BAD_REQUEST,
            ParseErrorKind::Conflict => StatusCode::UNPROCESSABLE_ENTITY,
        },
        SieveError::InvalidValue => StatusCode::UNPROCESSABLE_ENTITY,
        SieveError::Duplicate(_) => StatusCode::CONFLICT,
        SieveError::NotFound(_) => StatusCode::NOT_FOUND,
        SieveError::Persistence(_) | SieveError::Config(_) | SieveError::Io(_) | SieveError::Lock(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for SieveError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let error = format!("{self}");
        warn!(%error, code = %status.as_u16(), "request failed");
        (status, Json(ErrorResponse { status: "error".into(), error })).into_response()
    }
}

// The store may block on file I/O, so requests run on the blocking pool.
async fn blocking<T, F>(analyzer: Analyzer, job: F) -> Result<T, SieveError>
where
    T: Send + 'static,
    F: FnOnce(&Analyzer) -> Result<T, SieveError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || job(&analyzer))
        .await
        .map_err(|e| SieveError::Io(format!("join error: {e}")))?
}

async fn create(State(analyzer): State<Analyzer>, Json(request): Json<CreateRequest>) -> Result<Response, SieveError> {
    let value = match request.value {
        None | Some(Value::Null) => return Err(SieveError::MissingValue),
        Some(Value::String(value)) => value,
        Some(_) => return Err(SieveError::InvalidValue),
    };
    let record = blocking(analyzer, move |a| a.create(&value)).await?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

async fn list(State(analyzer): State<Analyzer>, Query(params): Query<FilterParams>) -> Result<Response, SieveError> {
    let outcome = blocking(analyzer, move |a| a.filter(&params)).await?;
    Ok(Json(outcome).into_response())
}

async fn natural(State(analyzer): State<Analyzer>, Query(request): Query<NaturalRequest>) -> Result<Response, SieveError> {
    let outcome = blocking(analyzer, move |a| a.filter_natural(&request.query)).await?;
    Ok(Json(outcome).into_response())
}

async fn fetch(State(analyzer): State<Analyzer>, Path(value): Path<String>) -> Result<Response, SieveError> {
    let record = blocking(analyzer, move |a| a.get(&value)).await?;
    Ok(Json(record).into_response())
}

async fn remove(State(analyzer): State<Analyzer>, Path(value): Path<String>) -> Result<Response, SieveError> {
    blocking(analyzer, move |a| a.delete(&value)).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub fn router(analyzer: Analyzer) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/strings", get(list).post(create))
        .route("/strings/filter-by-natural-language", get(natural))
        .route("/strings/:value", get(fetch).delete(remove))
        .with_state(analyzer)
        .layer(cors)
}
