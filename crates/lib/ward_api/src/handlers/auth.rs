//! Authentication request handlers.
//!
//! Each handler validates its payload shape, delegates to `services::auth`,
//! and wraps the outcome in the uniform envelope.

use axum::Extension;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;

use ward_core::notify::ClientDetails;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::{AuthenticatedUser, bearer_token};
use crate::models::{
    ForgotPasswordPayload, RefreshTokenPayload, ResetPasswordPayload, SignInPayload,
};
use crate::response::Envelope;
use crate::services;

/// Client ip + user agent, echoed in login-activity notifications.
fn client_details(headers: &HeaderMap) -> ClientDetails {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    ClientDetails { ip, user_agent }
}

/// `POST /auth/sign-in` — authenticate with username/email + password.
#[utoipa::path(
    post,
    path = "/auth/sign-in",
    request_body = SignInPayload,
    responses(
        (status = 200, description = "Token pair issued", body = Envelope),
        (status = 400, description = "Payload validation failure", body = Envelope),
        (status = 401, description = "Incorrect credentials", body = Envelope),
    ),
    tag = "auth"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<SignInPayload>,
) -> AppResult<Envelope> {
    let data = services::auth::sign_in(
        &state,
        &payload.username,
        &payload.password,
        client_details(&headers),
    )
    .await?;
    Ok(Envelope::ok(Some(serde_json::to_value(data)?)))
}

/// `POST /auth/refresh-token` — exchange a refresh token for a new pair.
#[utoipa::path(
    post,
    path = "/auth/refresh-token",
    request_body = RefreshTokenPayload,
    responses(
        (status = 200, description = "Fresh token pair issued", body = Envelope),
        (status = 400, description = "Payload validation failure", body = Envelope),
        (status = 401, description = "Invalid, revoked, or non-refresh token", body = Envelope),
        (status = 404, description = "No user associated with token", body = Envelope),
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<RefreshTokenPayload>,
) -> AppResult<Envelope> {
    let data =
        services::auth::refresh(&state, &payload.refresh_token, bearer_token(&headers)).await?;
    Ok(Envelope::ok(Some(serde_json::to_value(data)?)))
}

/// `GET /auth/sign-out` — revoke the caller's bearer token.
#[utoipa::path(
    get,
    path = "/auth/sign-out",
    responses(
        (status = 200, description = "Token revoked", body = Envelope),
        (status = 401, description = "Not authenticated", body = Envelope),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> AppResult<Envelope> {
    services::auth::sign_out(&state, &caller.bearer).await?;
    Ok(Envelope::ok(None))
}

/// `POST /auth/forgot-password` — issue a password-reset pin.
///
/// Answers the same success envelope whether or not the email is known.
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    request_body = ForgotPasswordPayload,
    responses(
        (status = 200, description = "Accepted", body = Envelope),
        (status = 400, description = "Payload validation failure", body = Envelope),
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordPayload>,
) -> AppResult<Envelope> {
    services::auth::forgot_password(&state, &payload.email).await?;
    Ok(Envelope::ok(None))
}

/// `POST /auth/reset-password` — set a new password authorized by a pin.
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    request_body = ResetPasswordPayload,
    responses(
        (status = 200, description = "Password changed, token pair issued", body = Envelope),
        (status = 400, description = "Expired pin, reused password, or bad payload", body = Envelope),
        (status = 404, description = "No user matches the pin", body = Envelope),
    ),
    tag = "auth"
)]
pub async fn reset_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<ResetPasswordPayload>,
) -> AppResult<Envelope> {
    let data = services::auth::reset_password(
        &state,
        &payload.otp,
        &payload.password,
        client_details(&headers),
    )
    .await?;
    Ok(Envelope::ok(Some(serde_json::to_value(data)?)))
}
