//! Application configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection URL for the scenario store, or `memory`
    pub database_url: String,

    /// Path to the local JSON catalog
    pub catalog_path: String,
    /// Remote catalog service; takes precedence over `catalog_path`
    pub catalog_url: Option<String>,

    /// HTTP/WebSocket server port
    pub server_port: u16,

    /// Upper bound on a single catalog lookup
    pub lookup_timeout: Duration,
    /// Values buffered per notification channel before slow subscribers lag
    pub broadcast_capacity: usize,
    /// Restore the saved scenario on startup
    pub autoload_state: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:combat_tracker.db?mode=rwc".to_string()),

            catalog_path: env::var("CATALOG_PATH").unwrap_or_else(|_| "catalog.json".to_string()),
            catalog_url: env::var("CATALOG_URL").ok().filter(|url| !url.trim().is_empty()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            lookup_timeout: Duration::from_millis(
                env::var("LOOKUP_TIMEOUT_MS")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .context("LOOKUP_TIMEOUT_MS must be a number of milliseconds")?,
            ),
            broadcast_capacity: env::var("BROADCAST_CAPACITY")
                .unwrap_or_else(|_| "64".to_string())
                .parse()
                .context("BROADCAST_CAPACITY must be a positive integer")?,
            autoload_state: env::var("AUTOLOAD_STATE")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        })
    }

    /// Whether scenario persistence should stay in process memory
    pub fn uses_memory_store(&self) -> bool {
        self.database_url == "memory"
    }
}
