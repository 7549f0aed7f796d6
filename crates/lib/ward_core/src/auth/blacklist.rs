//! Revoked-token blacklist.
//!
//! Append-only record of bearer token strings revoked before their natural
//! expiry, consulted by the auth middleware and the refresh flow. Rows are
//! never deleted here.

use sqlx::SqlitePool;

use super::AuthError;
use crate::uuid::uuidv7;

/// Record a token as revoked.
///
/// The `token` column is unique and the insert ignores conflicts, so
/// revoking the same string twice leaves exactly one row.
pub async fn revoke(pool: &SqlitePool, token: &str) -> Result<(), AuthError> {
    sqlx::query("INSERT OR IGNORE INTO blacklisted_tokens (id, token, created_at) VALUES (?, ?, ?)")
        .bind(uuidv7().to_string())
        .bind(token)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await?;
    Ok(())
}

/// Whether a token has been revoked.
pub async fn is_revoked(pool: &SqlitePool, token: &str) -> Result<bool, AuthError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM blacklisted_tokens WHERE token = ?)",
    )
    .bind(token)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}
