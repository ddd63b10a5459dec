//! Monster ability card

use serde::{Deserialize, Serialize};

use super::deck::DeckCard;

/// One ability card from a monster's behavior deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterCard {
    pub monster_name: String,
    pub monster_level: u32,
    /// Opaque display fragments, rendered in order by the client
    #[serde(default)]
    pub content: Vec<String>,
    /// Initiative printed on the card; lower acts first
    pub initiative: u32,
    #[serde(default)]
    pub shuffle: bool,
}

impl MonsterCard {
    pub fn new(monster_name: impl Into<String>, monster_level: u32, initiative: u32) -> Self {
        Self {
            monster_name: monster_name.into(),
            monster_level,
            content: Vec::new(),
            initiative,
            shuffle: false,
        }
    }

    pub fn with_content(mut self, line: impl Into<String>) -> Self {
        self.content.push(line.into());
        self
    }

    pub fn with_shuffle(mut self) -> Self {
        self.shuffle = true;
        self
    }
}

impl DeckCard for MonsterCard {
    fn triggers_reshuffle(&self) -> bool {
        self.shuffle
    }
}
