//! Authentication domain models.
//!
//! These are internal domain models; the API crate projects them into
//! wire-facing shapes (which strip the password hash and pin fields).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Roles a user can hold. Stored as TEXT in the `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum UserRole {
    SystemAdmin,
    HealthInstitutionAdmin,
    Staff,
    Patient,
}

/// Full user row, including credential and pin fields.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    pub is_verified: bool,
    pub one_time_pin: Option<String>,
    pub one_time_pin_generated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    pub is_verified: bool,
}

/// Discriminator carried in the JWT `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims embedded in every token Ward issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id.
    pub id: String,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Issuer.
    pub iss: String,
    /// `access` or `refresh`.
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

/// A freshly issued access + refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
