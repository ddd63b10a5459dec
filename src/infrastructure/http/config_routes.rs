//! Configuration API routes

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Runtime settings a client may inspect. Connection strings are omitted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub catalog: String,
    pub store: &'static str,
    pub lookup_timeout_ms: u64,
    pub broadcast_capacity: usize,
    pub autoload_state: bool,
}

/// Get the running configuration
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigSummary> {
    let config = &state.config;
    Json(ConfigSummary {
        catalog: match &config.catalog_url {
            Some(_) => "remote".to_string(),
            None => config.catalog_path.clone(),
        },
        store: if config.uses_memory_store() { "memory" } else { "sqlite" },
        lookup_timeout_ms: u64::try_from(config.lookup_timeout.as_millis()).unwrap_or(u64::MAX),
        broadcast_capacity: config.broadcast_capacity,
        autoload_state: config.autoload_state,
    })
}
