//! Scenario events pushed to connected clients
//!
//! Each variant mirrors one notification channel of the scenario service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{CharacterInitiative, Monster};

/// Data attached to every event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScenarioEvent {
    InitiativeChanged {
        metadata: EventMetadata,
        initiatives: Vec<CharacterInitiative>,
    },
    MonstersChanged {
        metadata: EventMetadata,
        monsters: Vec<Monster>,
    },
    GlobalLevelChanged {
        metadata: EventMetadata,
        level: u32,
    },
    RoundChanged {
        metadata: EventMetadata,
        round: u32,
    },
}

impl ScenarioEvent {
    pub fn initiative_changed(initiatives: Vec<CharacterInitiative>) -> Self {
        Self::InitiativeChanged {
            metadata: EventMetadata::default(),
            initiatives,
        }
    }

    pub fn monsters_changed(monsters: Vec<Monster>) -> Self {
        Self::MonstersChanged {
            metadata: EventMetadata::default(),
            monsters,
        }
    }

    pub fn global_level_changed(level: u32) -> Self {
        Self::GlobalLevelChanged {
            metadata: EventMetadata::default(),
            level,
        }
    }

    pub fn round_changed(round: u32) -> Self {
        Self::RoundChanged {
            metadata: EventMetadata::default(),
            round,
        }
    }
}
