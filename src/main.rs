//! Combat Tracker Engine - Backend for tabletop encounter tracking
//!
//! The Engine is the backend server that:
//! - Tracks players, monster groups and their spawned entities
//! - Orders combatants by initiative and counts rounds
//! - Runs monster ability decks and the attack modifier deck
//! - Persists the scenario to SQLite and pushes changes over WebSocket

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "combat_tracker_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Combat Tracker Engine");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");

    // Initialize application state
    let state = Arc::new(AppState::new(config).await?);
    tracing::info!("Application state initialized");

    if state.config.autoload_state {
        match state.scenario_service.load_state().await {
            Ok(true) => tracing::info!("Restored saved scenario"),
            Ok(false) => tracing::info!("No saved scenario, starting fresh"),
            Err(e) => tracing::warn!("Could not restore saved scenario: {}", e),
        }
    }

    // Build the router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(infrastructure::websocket::ws_handler))
        .merge(http::create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app);

    // Wait for shutdown signal (Ctrl+C)
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, saving scenario...");
        }
    }

    if let Err(e) = state.scenario_service.save_state().await {
        tracing::error!("Failed to save scenario on shutdown: {}", e);
    }

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
