//! API error handling
//!
//! Validation problems never reach this type; handlers answer them with a
//! warning-shaped success body. What remains is provider and infrastructure
//! failure, which is surfaced as a generic error status without leaking
//! backend detail.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// User-facing error message
    pub error: String,
    /// Stable error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            Self::ServiceUnavailable(msg) => {
                tracing::error!(detail = %msg, "Upstream provider unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service_unavailable",
                    "Service temporarily unavailable".to_string(),
                )
            },
            Self::Internal(msg) => {
                tracing::error!(detail = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Inference(e) => Self::ServiceUnavailable(e.to_string()),
            ApplicationError::Speech(e) => Self::ServiceUnavailable(e.to_string()),
            ApplicationError::Io(e) => Self::Internal(e.to_string()),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}
