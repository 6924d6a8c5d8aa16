//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scrub::ScrubError;
use serde::Serialize;
use tracing::warn;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Request is valid but the session is not ready for it.
    Conflict(String),
    /// Error from the scrub library.
    Scrub(ScrubError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    pub fn no_upload() -> Self {
        ApiError::NotFound("No dataset uploaded".to_string())
    }

    pub fn not_cleaned() -> Self {
        ApiError::Conflict("Dataset has not been cleaned yet".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Scrub(e) => {
                let (status, error) = match &e {
                    ScrubError::NoEligibleColumns { .. } | ScrubError::IneligibleColumn { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "chart_refused")
                    }
                    ScrubError::ColumnNotFound(_) => (StatusCode::NOT_FOUND, "column_not_found"),
                    ScrubError::NoFillValue { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "cleaning_failed")
                    }
                    ScrubError::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
                    _ => (StatusCode::BAD_REQUEST, "invalid_data"),
                };
                warn!("{}: {}", error, e);
                (status, error, e.to_string())
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<ScrubError> for ApiError {
    fn from(err: ScrubError) -> Self {
        ApiError::Scrub(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Scrub(e) => write!(f, "Scrub error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
