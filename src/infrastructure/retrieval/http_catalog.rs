//! HTTP client for a remote catalog service
//!
//! Endpoints, relative to the base URL:
//! - `GET players/{name}`
//! - `GET monsters/{name}`
//! - `GET monsters/{name}/stats/{level}`
//! - `GET monsters/{name}/cards/{level}`

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::application::ports::outbound::{LookupError, RetrievalPort};
use crate::domain::entities::{Monster, MonsterCard, Player};
use crate::domain::value_objects::MonsterStats;

pub struct HttpCatalogClient {
    client: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Catalog URL cannot be used as a base: {}", base_url);
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Build a URL from escaped path segments so names with spaces or slashes stay intact
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET a JSON document; a 404 is mapped with `not_found`
    async fn fetch<T: DeserializeOwned>(
        &self,
        url: Url,
        not_found: impl FnOnce() -> LookupError,
    ) -> Result<T, LookupError> {
        tracing::debug!(%url, "Catalog lookup");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transient(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(not_found());
        }
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LookupError::Transient(format!("{}: {}", status, error_text)));
        }

        response
            .json()
            .await
            .map_err(|e| LookupError::Transient(format!("Invalid catalog response: {}", e)))
    }
}

#[async_trait]
impl RetrievalPort for HttpCatalogClient {
    async fn get_player_info(&self, name: &str) -> Result<Player, LookupError> {
        self.fetch(self.url(&["players", name]), || {
            LookupError::NotFound(name.to_string())
        })
        .await
    }

    async fn get_monster_stats(&self, name: &str, level: u32) -> Result<MonsterStats, LookupError> {
        let level_segment = level.to_string();
        self.fetch(
            self.url(&["monsters", name, "stats", &level_segment]),
            || LookupError::NotFound(format!("{} level {}", name, level)),
        )
        .await
    }

    async fn get_monster_info(&self, name: &str) -> Result<Monster, LookupError> {
        self.fetch(self.url(&["monsters", name]), || {
            LookupError::UnknownSpecies(name.to_string())
        })
        .await
    }

    async fn get_monster_cards(&self, name: &str, level: u32) -> Result<Vec<MonsterCard>, LookupError> {
        let level_segment = level.to_string();
        self.fetch(
            self.url(&["monsters", name, "cards", &level_segment]),
            || LookupError::UnknownSpecies(name.to_string()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_escapes_names() {
        let client = HttpCatalogClient::new("http://catalog.local/api/").unwrap();
        let url = client.url(&["monsters", "Bandit Guard", "stats", "3"]);
        assert_eq!(
            url.as_str(),
            "http://catalog.local/api/monsters/Bandit%20Guard/stats/3"
        );

        let url = client.url(&["players", "a/b"]);
        assert_eq!(url.as_str(), "http://catalog.local/api/players/a%2Fb");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(HttpCatalogClient::new("mailto:someone@example.com").is_err());
    }
}
