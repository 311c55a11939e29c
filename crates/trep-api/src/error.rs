//! API error types and JSON error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// API-level error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("no SQL database configured for this deployment")]
    NotConfigured,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<trep_match::MatchError> for ApiError {
    fn from(err: trep_match::MatchError) -> Self {
        match err {
            trep_match::MatchError::Cancelled | trep_match::MatchError::DeadlineExceeded => {
                ApiError::BadRequest(err.to_string())
            }
            trep_match::MatchError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<trep_db::DbError> for ApiError {
    fn from(err: trep_db::DbError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_key, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::NotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "not_configured",
                self.to_string(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: error_key.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
