//! API schema document.

use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    AuthData, ForgotPasswordPayload, RefreshTokenPayload, ResetPasswordPayload, SignInPayload,
    UserOut,
};
use crate::response::Envelope;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ward REST API",
        description = "Ward REST API",
        version = "1.0"
    ),
    paths(
        crate::handlers::auth::sign_in,
        crate::handlers::auth::refresh_token,
        crate::handlers::auth::sign_out,
        crate::handlers::auth::forgot_password,
        crate::handlers::auth::reset_password,
    ),
    components(schemas(
        Envelope,
        SignInPayload,
        RefreshTokenPayload,
        ForgotPasswordPayload,
        ResetPasswordPayload,
        UserOut,
        AuthData,
    )),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// `GET /docs` — the generated OpenAPI document.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
