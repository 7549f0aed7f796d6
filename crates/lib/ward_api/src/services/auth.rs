//! Authentication flows — sign-in, token refresh, sign-out, password reset.

use chrono::Utc;
use tracing::{info, warn};

use ward_core::auth::{blacklist, otp, password, queries};
use ward_core::models::auth::{TokenKind, User};
use ward_core::notify::{ClientDetails, Notification};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{AuthData, UserOut};

/// Authenticate with username/email + password and issue a token pair.
///
/// Queues a login-activity notification, and a verification-code resend when
/// the account is not yet verified.
pub async fn sign_in(
    state: &AppState,
    username: &str,
    pass: &str,
    client: ClientDetails,
) -> AppResult<AuthData> {
    let user = queries::find_user_by_username_or_email(&state.pool, username).await?;
    let Some(user) = user else {
        return Err(AppError::Unauthorized(
            "Incorrect username/email or password".into(),
        ));
    };

    if !password::verify_password(pass, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "Incorrect username/email or password".into(),
        ));
    }

    state.tasks.dispatch(Notification::LoginActivity {
        user_id: user.id.clone(),
        email: user.email.clone(),
        client,
        at: Utc::now(),
    });

    if !user.is_verified {
        state.tasks.dispatch(Notification::VerificationCode {
            user_id: user.id.clone(),
            email: user.email.clone(),
        });
    }

    info!(user_id = %user.id, "user signed in");
    issue_tokens(state, user)
}

/// Exchange a refresh token for a fresh pair, rotating the old one out.
///
/// The presented refresh token is blacklisted so it cannot be replayed, and
/// the request's bearer token (when one was sent) is blacklisted with it.
pub async fn refresh(
    state: &AppState,
    refresh_token: &str,
    bearer: Option<&str>,
) -> AppResult<AuthData> {
    let claims = state
        .tokens
        .decode_claims(refresh_token)
        .map_err(|_| AppError::Unauthorized("Invalid refresh token".into()))?;

    if claims.kind != TokenKind::Refresh {
        return Err(AppError::Unauthorized("Incorrect token type".into()));
    }

    if blacklist::is_revoked(&state.pool, refresh_token).await? {
        return Err(AppError::Unauthorized("Token has been revoked".into()));
    }

    let user = queries::find_user_by_id(&state.pool, &claims.id)
        .await?
        .ok_or_else(|| AppError::NotFound(Some("No user associated with token".into())))?;

    blacklist::revoke(&state.pool, refresh_token).await?;
    if let Some(bearer) = bearer {
        blacklist::revoke(&state.pool, bearer).await?;
    }

    info!(user_id = %user.id, "refresh token rotated");
    issue_tokens(state, user)
}

/// Revoke the caller's bearer token.
pub async fn sign_out(state: &AppState, bearer: &str) -> AppResult<()> {
    blacklist::revoke(&state.pool, bearer).await?;
    Ok(())
}

/// Start a password reset: persist a one-time pin and queue its delivery.
///
/// An unknown email gets the same success outcome as a known one, so the
/// endpoint leaks nothing about which addresses have accounts.
pub async fn forgot_password(state: &AppState, email: &str) -> AppResult<()> {
    let Some(user) = queries::find_user_by_email(&state.pool, email).await? else {
        warn!("password reset requested for unknown email");
        return Ok(());
    };

    let pin = otp::generate_pin();
    queries::set_one_time_pin(&state.pool, &user.id, &pin, Utc::now()).await?;

    state.tasks.dispatch(Notification::PasswordResetOtp {
        user_id: user.id.clone(),
        email: user.email,
        pin,
    });

    info!(user_id = %user.id, "password reset pin issued");
    Ok(())
}

/// Complete a password reset authorized by a one-time pin.
///
/// A pin detected expired is cleared on the spot so it cannot match again.
/// The reuse check runs before the pin is consumed, so a rejected password
/// leaves the pin valid for another attempt.
pub async fn reset_password(
    state: &AppState,
    pin: &str,
    new_password: &str,
    client: ClientDetails,
) -> AppResult<AuthData> {
    let user = queries::find_user_by_one_time_pin(&state.pool, pin)
        .await?
        .ok_or(AppError::NotFound(None))?;

    let generated_at = user
        .one_time_pin_generated_at
        .ok_or_else(|| AppError::Internal("pin row missing generation time".into()))?;

    if otp::is_expired(generated_at, Utc::now()) {
        queries::clear_one_time_pin(&state.pool, &user.id).await?;
        return Err(AppError::BadRequest("OTP Expired".into()));
    }

    password::set_password(&state.pool, &user.id, new_password).await?;
    queries::clear_one_time_pin(&state.pool, &user.id).await?;

    state.tasks.dispatch(Notification::LoginActivity {
        user_id: user.id.clone(),
        email: user.email.clone(),
        client,
        at: Utc::now(),
    });

    info!(user_id = %user.id, "password reset completed");
    issue_tokens(state, user)
}

fn issue_tokens(state: &AppState, user: User) -> AppResult<AuthData> {
    let pair = state.tokens.issue_pair(&user.id)?;
    Ok(AuthData {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        user: UserOut::from(user),
    })
}
