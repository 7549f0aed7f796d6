//! Application error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::response::Envelope;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// Every variant renders as the uniform envelope. `Internal` logs its detail
/// and answers with a bare 500; the caller never sees the underlying text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failure")]
    Validation(Value),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Not found")]
    NotFound(Option<String>),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let envelope = match self {
            AppError::Validation(issues) => {
                Envelope::err(StatusCode::BAD_REQUEST, None, Some(issues))
            }
            AppError::BadRequest(m) => Envelope::err(StatusCode::BAD_REQUEST, Some(m), None),
            AppError::Unauthorized(m) => Envelope::err(StatusCode::UNAUTHORIZED, Some(m), None),
            AppError::Forbidden(m) => Envelope::err(StatusCode::FORBIDDEN, Some(m), None),
            AppError::NotFound(m) => Envelope::err(StatusCode::NOT_FOUND, m, None),
            AppError::Internal(detail) => {
                error!(error = %detail, "unhandled error");
                Envelope::err(StatusCode::INTERNAL_SERVER_ERROR, None, None)
            }
        };
        envelope.into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(format!("database: {e}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(format!("serialization: {e}"))
    }
}

impl From<ward_core::auth::AuthError> for AppError {
    fn from(e: ward_core::auth::AuthError) -> Self {
        use ward_core::auth::AuthError;
        match e {
            AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            AuthError::PasswordUsed => {
                AppError::BadRequest("This password has been used before".into())
            }
            AuthError::DbError(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}
