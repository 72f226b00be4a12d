mod config;
mod dashboard;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dashboard::DashboardManager;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeAI API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the generator client
    let generator = GeminiClient::new(config.gemini_api_key.clone());
    info!("Generator client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        generator: Arc::new(generator),
        config: config.clone(),
        dashboard: DashboardManager::new(),
    };

    // Build router. CORS stays permissive: the frontend is served from a
    // different origin and consumes these endpoints directly.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
