//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::{KeyValueStorePort, RetrievalPort};
use crate::application::services::{DeckService, ScenarioNotifier, ScenarioService};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::{InMemoryKeyValueStore, SqliteKeyValueStore};
use crate::infrastructure::retrieval::{HttpCatalogClient, JsonCatalog};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub scenario_service: ScenarioService,
    pub deck_service: DeckService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let retrieval: Arc<dyn RetrievalPort> = match &config.catalog_url {
            Some(url) => {
                tracing::info!("  Catalog: {}", url);
                Arc::new(HttpCatalogClient::new(url)?)
            }
            None => {
                tracing::info!("  Catalog: {}", config.catalog_path);
                Arc::new(JsonCatalog::load(&config.catalog_path).await?)
            }
        };

        let store: Arc<dyn KeyValueStorePort> = if config.uses_memory_store() {
            tracing::info!("  Store: in-memory");
            Arc::new(InMemoryKeyValueStore::new())
        } else {
            tracing::info!("  Store: {}", config.database_url);
            Arc::new(SqliteKeyValueStore::connect(&config.database_url).await?)
        };

        Ok(Self::from_ports(config, retrieval, store))
    }

    /// Wire services around already-constructed adapters
    pub fn from_ports(
        config: AppConfig,
        retrieval: Arc<dyn RetrievalPort>,
        store: Arc<dyn KeyValueStorePort>,
    ) -> Self {
        let scenario_service = ScenarioService::new(
            retrieval.clone(),
            store,
            ScenarioNotifier::new(config.broadcast_capacity),
            config.lookup_timeout,
        );
        let deck_service = DeckService::new(retrieval, config.lookup_timeout);

        Self {
            config,
            scenario_service,
            deck_service,
        }
    }
}
