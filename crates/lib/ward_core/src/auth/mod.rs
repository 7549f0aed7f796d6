//! Authentication and authorization logic.
//!
//! Provides password hashing with reuse protection, JWT issuance and
//! verification, one-time pin lifecycle, the revoked-token blacklist, and
//! the database queries shared by the API layer.

pub mod blacklist;
pub mod jwt;
pub mod otp;
pub mod password;
pub mod queries;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token error: {0}")]
    TokenError(String),

    #[error("This password has been used before")]
    PasswordUsed,

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
