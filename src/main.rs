// src/main.rs

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use colloquy::api::http::router::api_router;
use colloquy::config::Config;
use colloquy::db;
use colloquy::provider;
use colloquy::state::create_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env();

    info!("Starting colloquy chat server");
    info!(
        "GEMINI_API_KEY: {}",
        if config.echo_mode() { "not found" } else { "found" }
    );

    // Create database pool and apply schema
    let pool = db::create_pool(&config.database_url, config.sqlite_max_connections).await?;
    db::run_migrations(&pool).await?;

    // Select the generation provider once at startup; the rest of the
    // pipeline never knows which one is active.
    let provider = provider::from_config(&config);

    let app_state = Arc::new(create_app_state(pool, provider));

    let app = Router::new()
        .nest("/api", api_router(app_state))
        .layer(CorsLayer::permissive());

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
