//! Auth-related database queries.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::AuthError;
use crate::models::auth::{NewUser, User};
use crate::uuid::{uuidv4, uuidv7};

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, password_hash, role, \
     is_verified, one_time_pin, one_time_pin_generated_at, created_at, updated_at";

/// Create a new user, recording the initial hash in the password history.
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, AuthError> {
    let id = uuidv4().to_string();
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO users (id, username, email, first_name, last_name, password_hash, role, \
         is_verified, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&new_user.username)
    .bind(&new_user.email)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(&new_user.password_hash)
    .bind(new_user.role)
    .bind(new_user.is_verified)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    record_password_hash(pool, &id, &new_user.password_hash).await?;

    find_user_by_id(pool, &id)
        .await?
        .ok_or_else(|| AuthError::Internal("created user row not found".into()))
}

/// Fetch a user matching the given identifier against username or email.
pub async fn find_user_by_username_or_email(
    pool: &SqlitePool,
    identifier: &str,
) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ? OR email = ?"
    ))
    .bind(identifier)
    .bind(identifier)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Fetch a user by email.
pub async fn find_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Fetch a user by id.
pub async fn find_user_by_id(pool: &SqlitePool, user_id: &str) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Fetch the user holding the given one-time pin.
pub async fn find_user_by_one_time_pin(
    pool: &SqlitePool,
    pin: &str,
) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE one_time_pin = ?"
    ))
    .bind(pin)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Persist a freshly generated one-time pin and its issue time.
pub async fn set_one_time_pin(
    pool: &SqlitePool,
    user_id: &str,
    pin: &str,
    generated_at: DateTime<Utc>,
) -> Result<(), AuthError> {
    sqlx::query(
        "UPDATE users SET one_time_pin = ?, one_time_pin_generated_at = ?, updated_at = ? \
         WHERE id = ?",
    )
    .bind(pin)
    .bind(generated_at)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Clear a user's one-time pin fields.
///
/// Called both when a pin is consumed and when it is detected expired, so a
/// spent or stale pin can never match a later reset attempt.
pub async fn clear_one_time_pin(pool: &SqlitePool, user_id: &str) -> Result<(), AuthError> {
    sqlx::query(
        "UPDATE users SET one_time_pin = NULL, one_time_pin_generated_at = NULL, updated_at = ? \
         WHERE id = ?",
    )
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Every password hash ever set for a user, newest first.
pub async fn password_history(pool: &SqlitePool, user_id: &str) -> Result<Vec<String>, AuthError> {
    let rows = sqlx::query_scalar::<_, String>(
        "SELECT password_hash FROM password_history WHERE user_id = ? ORDER BY id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Write a new password hash to the user row and append it to the history.
pub async fn update_password_hash(
    pool: &SqlitePool,
    user_id: &str,
    password_hash: &str,
) -> Result<(), AuthError> {
    sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
        .bind(password_hash)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;
    record_password_hash(pool, user_id, password_hash).await
}

async fn record_password_hash(
    pool: &SqlitePool,
    user_id: &str,
    password_hash: &str,
) -> Result<(), AuthError> {
    sqlx::query("INSERT INTO password_history (id, user_id, password_hash, created_at) VALUES (?, ?, ?, ?)")
        .bind(uuidv7().to_string())
        .bind(user_id)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    Ok(())
}
