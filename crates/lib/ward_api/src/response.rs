//! The uniform response envelope.
//!
//! Every endpoint answers with the same five-key body, success or failure:
//! `{bool_status, num_status, message, data, issues}`. All keys are always
//! serialized; absent values are `null`. `num_status` mirrors the HTTP
//! status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// The uniform response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    /// True for success responses, false otherwise.
    pub bool_status: bool,
    /// Numeric HTTP status, repeated in the body.
    pub num_status: u16,
    /// Human-readable outcome, if any.
    pub message: Option<String>,
    /// Endpoint payload on success.
    #[schema(value_type = Object, nullable)]
    pub data: Option<Value>,
    /// Field-level validation issues or failure detail.
    #[schema(value_type = Object, nullable)]
    pub issues: Option<Value>,
}

impl Envelope {
    /// Success envelope (200), optionally carrying data.
    pub fn ok(data: Option<Value>) -> Self {
        Self {
            bool_status: true,
            num_status: StatusCode::OK.as_u16(),
            message: None,
            data,
            issues: None,
        }
    }

    /// Failure envelope for the given status.
    pub fn err(status: StatusCode, message: Option<String>, issues: Option<Value>) -> Self {
        Self {
            bool_status: false,
            num_status: status.as_u16(),
            message,
            data: None,
            issues,
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.num_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
