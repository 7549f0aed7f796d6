//! Authentication and authorization middleware.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use ward_core::auth::blacklist;
use ward_core::auth::queries;
use ward_core::models::auth::{TokenKind, User, UserRole};

use crate::AppState;
use crate::error::AppError;

/// The verified caller, injected into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    /// The raw bearer token the caller presented.
    pub bearer: String,
}

/// Pull the bearer token out of an `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Axum middleware: verifies the bearer token as a live access token and
/// injects [`AuthenticatedUser`] into request extensions.
///
/// Rejects 401 when the header is missing or malformed, the token fails
/// verification, its `type` is not `access`, it has been revoked, or its
/// user no longer exists.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?
        .to_string();

    let claims = state
        .tokens
        .decode_claims(&token)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    if claims.kind != TokenKind::Access {
        return Err(AppError::Unauthorized("Incorrect token type".into()));
    }

    if blacklist::is_revoked(&state.pool, &token).await? {
        return Err(AppError::Unauthorized("Token has been revoked".into()));
    }

    let user = queries::find_user_by_id(&state.pool, &claims.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("No user associated with token".into()))?;

    request.extensions_mut().insert(AuthenticatedUser {
        user,
        bearer: token,
    });

    Ok(next.run(request).await)
}

/// Axum middleware: allows the request iff the authenticated caller is a
/// system admin. Must run behind [`require_auth`].
pub async fn require_system_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let caller = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    if caller.user.role != UserRole::SystemAdmin {
        return Err(AppError::Forbidden(
            "You must be a system admin to access this resource.".into(),
        ));
    }

    Ok(next.run(request).await)
}
