//! Retrieval port - Lookup of player and monster reference data
//!
//! Every lookup is a single request that resolves to a value or an explicit
//! error, so callers can tell a missing record from a transient failure.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::{Monster, MonsterCard, Player};
use crate::domain::value_objects::MonsterStats;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("No such monster species: {0}")]
    UnknownSpecies(String),
    #[error("Invalid stats for {name}: {reason}")]
    InvalidStats { name: String, reason: String },
    #[error("Lookup failed: {0}")]
    Transient(String),
    #[error("Lookup timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait RetrievalPort: Send + Sync {
    /// Player portrait and default initiative by character name
    async fn get_player_info(&self, name: &str) -> Result<Player, LookupError>;

    /// Normal and elite stats for a species at a level
    async fn get_monster_stats(&self, name: &str, level: u32) -> Result<MonsterStats, LookupError>;

    /// Species metadata as a monster group with no entities
    async fn get_monster_info(&self, name: &str) -> Result<Monster, LookupError>;

    /// The species' ability deck at a level
    async fn get_monster_cards(&self, name: &str, level: u32) -> Result<Vec<MonsterCard>, LookupError>;
}
