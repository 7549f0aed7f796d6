//! # ward_api
//!
//! HTTP API library for Ward.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod services;

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tracing::error;

use ward_core::auth::jwt::TokenIssuer;
use ward_core::notify::{NotificationSink, TaskQueue};

use crate::config::ApiConfig;
use crate::handlers::{auth, docs};
use crate::response::Envelope;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool.
    pub pool: SqlitePool,
    /// API configuration.
    pub config: ApiConfig,
    /// Token signer/verifier, built once from the configured secret.
    pub tokens: Arc<TokenIssuer>,
    /// Background notification queue.
    pub tasks: TaskQueue,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: ApiConfig, sink: Arc<dyn NotificationSink>) -> Self {
        let tokens = Arc::new(TokenIssuer::new(
            config.jwt_secret.as_bytes(),
            config.jwt_issuer.clone(),
        ));
        Self {
            pool,
            config,
            tokens,
            tasks: TaskQueue::new(sink),
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `ward_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    ward_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/refresh-token", post(auth::refresh_token))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/docs", get(docs::openapi));

    // Protected routes (require auth)
    let protected = Router::new()
        .route("/auth/sign-out", get(auth::sign_out))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .with_state(state)
}

/// Envelope 404 for unmatched paths.
async fn not_found() -> Envelope {
    Envelope::err(StatusCode::NOT_FOUND, Some("Not Found".into()), None)
}

/// Envelope 405 for matched paths with the wrong method.
async fn method_not_allowed() -> Envelope {
    Envelope::err(
        StatusCode::METHOD_NOT_ALLOWED,
        Some("Method not allowed".into()),
        None,
    )
}

/// Last line of defense: anything that panics past the handlers becomes an
/// envelope 500 instead of a dropped connection.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "request handler panicked");
    Envelope::err(
        StatusCode::INTERNAL_SERVER_ERROR,
        Some("Server Exception".into()),
        Some(serde_json::Value::String(detail)),
    )
    .into_response()
}
