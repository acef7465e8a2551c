mod adapters;
mod assistant;
mod config;
mod document;
mod errors;
mod llm_client;
mod market;
mod models;
mod resume;
mod routes;
mod session;
mod skills;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::market::JobMarketDataset;
use crate::routes::build_router;
use crate::session::SessionRegistry;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillGap API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = GeminiClient::new(&config).context("Failed to build the Gemini HTTP client")?;
    if llm.is_configured() {
        info!("LLM client initialized (model: {})", llm.model());
    } else {
        warn!("GEMINI_API_KEY is not set; every LLM feature will serve its fallback");
    }

    // Load the job market dataset once
    let market = JobMarketDataset::load_dir(&config.dataset_dir)
        .with_context(|| format!("Failed to load job market data from '{}'", config.dataset_dir))?;

    // Sessions live in memory; idle ones are swept in the background
    let sessions =
        SessionRegistry::with_idle_ttl(Duration::from_secs(config.session_idle_ttl_secs));
    sessions.spawn_sweeper(Duration::from_secs(config.session_sweep_interval_secs.max(1)));

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        market: Arc::new(market),
        sessions,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
