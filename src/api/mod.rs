//! REST API endpoints.
//!
//! Axum-based HTTP API for uploading timecard images and recomputing
//! edited entries.

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::agents::AgentError;

pub mod routes;
pub mod state;

use state::AppState;

/// Uploaded images are rejected above this size.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Model output unparseable: {message}")]
    MalformedModelOutput { message: String, raw_response: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::MalformedOutput(e) => ApiError::MalformedModelOutput {
                raw_response: e.raw_text().to_string(),
                message: e.to_string(),
            },
            AgentError::ServiceUnavailable(_) | AgentError::ServiceError { .. } => {
                ApiError::ExtractionFailed(err.to_string())
            }
            AgentError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,

    /// Raw model text, included when the upstream answer could not be
    /// parsed so the caller can inspect or retry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::ExtractionFailed(_) => (StatusCode::BAD_GATEWAY, "EXTRACTION_FAILED"),
            ApiError::MalformedModelOutput { .. } => {
                (StatusCode::BAD_GATEWAY, "MALFORMED_MODEL_OUTPUT")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let raw_response = match &self {
            ApiError::MalformedModelOutput { raw_response, .. } => Some(raw_response.clone()),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                raw_response,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::health::health))
        .route("/upload_timecard", post(routes::timecards::upload_timecard))
        .route("/edit_timecard", put(routes::timecards::edit_timecard))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
