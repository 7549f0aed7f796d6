//! API server configuration.
//!
//! Built once at startup (CLI args with env fallbacks) and carried in
//! `AppState`, so nothing reads ambient environment state at request time.

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// SQLite connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// `iss` claim stamped into every issued token.
    pub jwt_issuer: String,
}
