//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use docroom_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Newtype carrying `AppError` across the Axum response boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = match err.kind {
            ErrorKind::LinkNotFound => (StatusCode::NOT_FOUND, "INVALID_LINK"),
            ErrorKind::LinkRevoked => (StatusCode::FORBIDDEN, "LINK_REVOKED"),
            ErrorKind::LinkExpired => (StatusCode::GONE, "LINK_EXPIRED"),
            ErrorKind::MaxViewsExceeded => (StatusCode::FORBIDDEN, "MAX_VIEWS_EXCEEDED"),
            ErrorKind::PasswordIncorrect => (StatusCode::UNAUTHORIZED, "PASSWORD_INCORRECT"),
            ErrorKind::NdaNotSigned => (StatusCode::FORBIDDEN, "NDA_NOT_SIGNED"),
            ErrorKind::ContentEmpty => (StatusCode::NOT_FOUND, "NO_DOCUMENTS"),
            ErrorKind::ContentUnavailable => (StatusCode::BAD_GATEWAY, "CONTENT_UNAVAILABLE"),
            ErrorKind::Session => (StatusCode::UNAUTHORIZED, "SESSION_EXPIRED"),
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Backend => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
            ErrorKind::Configuration | ErrorKind::Serialization | ErrorKind::Internal => {
                tracing::error!(error = %err.message, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}
