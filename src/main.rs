//! WHOIS squads server
//!
//! Server-rendered people and squad directory on top of the remote WHOIS API,
//! with emoji reactions stored back on each person record.

mod api;
mod config;
mod directory;
mod errors;
mod models;
mod views;
mod whois;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use models::Squad;
use whois::WhoisClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub whois: Arc<WhoisClient>,
    /// Squads fetched once at startup, read-only afterwards
    pub squads: Arc<Vec<Squad>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the state, taking the squad snapshot from the WHOIS API.
    pub async fn load(config: Config) -> Result<Self, errors::AppError> {
        let whois = WhoisClient::new(&config.api_url, config.request_timeout)?;
        let squads = whois.list_squads().await?;

        Ok(Self {
            whois: Arc::new(whois),
            squads: Arc::new(squads),
            config: Arc::new(config),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting WHOIS squads server");
    tracing::info!("WHOIS API: {}", config.api_url);
    tracing::info!("Static directory: {:?}", config.static_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.request_timeout.is_none() {
        tracing::warn!(
            "No WHOIS request timeout configured (WHOIS_TIMEOUT_SECS). A hanging API hangs requests!"
        );
    }

    // Take the squad snapshot
    tracing::info!("Fetching squads...");
    let bind_addr = config.bind_addr;
    let state = AppState::load(config).await?;
    tracing::info!(
        "Loaded {} squads from {}",
        state.squads.len(),
        state.whois.base_url()
    );

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Application started on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Listings
        .route("/", get(api::index).post(api::post_index))
        .route("/sort", get(api::sort_ascending))
        .route("/sort-desc", get(api::sort_descending))
        .route("/squad/{squad_id}", get(api::squad_members))
        // Detail
        .route("/person/{id}", get(api::person_detail))
        // Reactions
        .route("/detail/{id}/SE-GL-emoji", post(api::add_reaction))
        // Health check
        .route("/health", get(health_check))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
