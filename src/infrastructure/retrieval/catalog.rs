//! Local JSON catalog of players and monster species
//!
//! ```json
//! {
//!   "players": [{ "name": "Brute", "initiative": 0, "image": "brute.png" }],
//!   "monsters": [{
//!     "name": "Bandit Guard", "initiative": 30, "image": "bandit-guard.png",
//!     "levels": [{ "level": 1, "normalStats": { "health": 6 }, "eliteStats": { "health": 9, "shield": 1 } }],
//!     "cards": [{ "initiative": 15, "content": ["Move +1", "Attack -1"], "shuffle": true }]
//!   }]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::{LookupError, RetrievalPort};
use crate::domain::entities::{Monster, MonsterCard, Player};
use crate::domain::value_objects::{MonsterStats, Stats};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub monsters: Vec<CatalogMonster>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMonster {
    pub name: String,
    #[serde(default)]
    pub initiative: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub levels: Vec<CatalogLevel>,
    #[serde(default)]
    pub cards: Vec<CatalogCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogLevel {
    pub level: u32,
    pub normal_stats: Stats,
    pub elite_stats: Stats,
}

/// Level-independent ability card; stamped with name and level on lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCard {
    pub initiative: u32,
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub shuffle: bool,
}

impl Catalog {
    fn species(&self, name: &str) -> Result<&CatalogMonster, LookupError> {
        self.monsters
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| LookupError::UnknownSpecies(name.to_string()))
    }
}

/// Retrieval adapter serving lookups from an in-memory [`Catalog`]
pub struct JsonCatalog {
    catalog: Catalog,
}

impl JsonCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog = serde_json::from_str(json).context("Failed to parse catalog JSON")?;
        Ok(Self::new(catalog))
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog at {}", path.display()))?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            players = catalog.catalog.players.len(),
            monsters = catalog.catalog.monsters.len(),
            "Loaded catalog from {}",
            path.display()
        );
        Ok(catalog)
    }
}

#[async_trait]
impl RetrievalPort for JsonCatalog {
    async fn get_player_info(&self, name: &str) -> Result<Player, LookupError> {
        self.catalog
            .players
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }

    async fn get_monster_stats(&self, name: &str, level: u32) -> Result<MonsterStats, LookupError> {
        let species = self.catalog.species(name)?;
        species
            .levels
            .iter()
            .find(|l| l.level == level)
            .map(|l| MonsterStats::new(l.normal_stats, l.elite_stats))
            .ok_or_else(|| LookupError::NotFound(format!("{} level {}", name, level)))
    }

    async fn get_monster_info(&self, name: &str) -> Result<Monster, LookupError> {
        let species = self.catalog.species(name)?;
        let level = species.levels.iter().map(|l| l.level).min().unwrap_or(0);
        Ok(Monster::new(&species.name, level, species.initiative).with_image(&species.image))
    }

    async fn get_monster_cards(&self, name: &str, level: u32) -> Result<Vec<MonsterCard>, LookupError> {
        let species = self.catalog.species(name)?;
        Ok(species
            .cards
            .iter()
            .map(|card| MonsterCard {
                monster_name: species.name.clone(),
                monster_level: level,
                content: card.content.clone(),
                initiative: card.initiative,
                shuffle: card.shuffle,
            })
            .collect())
    }
}
