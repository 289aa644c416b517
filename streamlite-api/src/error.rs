//! API error types

use crate::services::ArchiveError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Local catalog query failed (500)
    #[error("Catalog error: {0}")]
    Catalog(#[from] sqlx::Error),

    /// Direct provider lookup failed (500)
    #[error("Resolution failed: {0}")]
    Resolution(#[from] ArchiveError),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Catalog(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SEARCH_FAILED",
                err.to_string(),
            ),
            ApiError::Resolution(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "RESOLUTION_FAILED",
                err.to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
