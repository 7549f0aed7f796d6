//! Password hashing via bcrypt, with reuse protection.
//!
//! Every hash ever set for a user is appended to `password_history`; a
//! password change is rejected when the candidate matches any prior hash.

use sqlx::SqlitePool;

use super::{AuthError, queries};

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt (cost 10).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|e| AuthError::Internal(format!("bcrypt verify: {e}")))
}

/// Change a user's password.
///
/// Rejects with [`AuthError::PasswordUsed`] when the candidate matches any
/// hash in the user's history, leaving the user row untouched. On success the
/// new hash is written to the user row and appended to the history.
pub async fn set_password(
    pool: &SqlitePool,
    user_id: &str,
    new_password: &str,
) -> Result<(), AuthError> {
    let history = queries::password_history(pool, user_id).await?;
    for prior in &history {
        if verify_password(new_password, prior)? {
            return Err(AuthError::PasswordUsed);
        }
    }

    let hash = hash_password(new_password)?;
    queries::update_password_hash(pool, user_id, &hash).await?;
    Ok(())
}
