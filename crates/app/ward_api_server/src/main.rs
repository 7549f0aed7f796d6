//! Ward REST API server binary.

use std::sync::Arc;

use clap::Parser;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use ward_api::config::ApiConfig;
use ward_core::notify::LoggingSink;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "ward_api_server", about = "Ward REST API server")]
struct Args {
    /// Address to bind the HTTP listener.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    bind_addr: String,

    /// SQLite connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://ward.db?mode=rwc")]
    database_url: String,

    /// JWT signing secret.
    #[arg(long, env = "JWT_SECRET")]
    jwt_secret: String,

    /// `iss` claim stamped into every issued token.
    #[arg(long, env = "JWT_ISSUER", default_value = "ward-api")]
    jwt_issuer: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ward_api=debug,ward_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    info!(database_url = %args.database_url, bind_addr = %args.bind_addr, "starting ward_api_server");

    let pool = SqlitePoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    info!("running database migrations");
    ward_api::migrate(&pool).await?;

    let config = ApiConfig {
        bind_addr: args.bind_addr,
        database_url: args.database_url,
        jwt_secret: args.jwt_secret,
        jwt_issuer: args.jwt_issuer,
    };

    let state = ward_api::AppState::new(pool, config.clone(), Arc::new(LoggingSink));
    let app = ward_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
