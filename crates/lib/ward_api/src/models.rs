//! Wire-facing request payloads and response projections.
//!
//! Payload fields use `#[serde(default)]` so a missing field surfaces as a
//! field-level validation issue instead of a deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use ward_core::models::auth::{User, UserRole};

#[derive(Debug, Deserialize, Validate, ToSchema)]
/// Payload for `POST /auth/sign-in`.
pub struct SignInPayload {
    /// Username or email address.
    #[serde(default)]
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
/// Payload for `POST /auth/refresh-token`.
pub struct RefreshTokenPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
/// Payload for `POST /auth/forgot-password`.
pub struct ForgotPasswordPayload {
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
/// Payload for `POST /auth/reset-password`.
pub struct ResetPasswordPayload {
    /// The one-time pin delivered to the user.
    #[serde(default)]
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub otp: String,
    /// Replacement password.
    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
}

/// User projection returned by the auth endpoints.
///
/// Strips the password hash and one-time-pin fields from the row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserOut {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[schema(value_type = String)]
    pub role: UserRole,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

/// `data` payload for endpoints that issue a token pair.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthData {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserOut,
}
