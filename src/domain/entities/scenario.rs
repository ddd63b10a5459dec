//! Scenario aggregate - all combatant state for one encounter
//!
//! This is the single persisted unit. Names are unique within each of the
//! player and monster lists.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::monster::Monster;
use super::player::Player;

/// Initial difficulty level of a fresh scenario
pub const DEFAULT_GLOBAL_LEVEL: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioState {
    pub players: Vec<Player>,
    pub monsters: Vec<Monster>,
    pub global_level: u32,
    pub rounds: u32,
}

impl Default for ScenarioState {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            monsters: Vec::new(),
            global_level: DEFAULT_GLOBAL_LEVEL,
            rounds: 0,
        }
    }
}

/// Which list a combatant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    Monster,
    Player,
}

/// Projection of a combatant for the initiative tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInitiative {
    pub name: String,
    pub initiative: u32,
    pub image: String,
    #[serde(rename = "type")]
    pub kind: CharacterKind,
}

impl ScenarioState {
    /// Check a restored scenario and restore entity ordering
    ///
    /// Rejects a level below 1 and duplicate player or monster names.
    pub fn normalize(&mut self) -> Result<(), String> {
        if self.global_level == 0 {
            return Err("globalLevel must be at least 1".to_string());
        }

        let mut seen = HashSet::new();
        if let Some(player) = self.players.iter().find(|p| !seen.insert(p.name.as_str())) {
            return Err(format!("duplicate player '{}'", player.name));
        }

        let mut seen = HashSet::new();
        if let Some(monster) = self.monsters.iter().find(|m| !seen.insert(m.name.as_str())) {
            return Err(format!("duplicate monster '{}'", monster.name));
        }

        for monster in &mut self.monsters {
            monster.entities.sort_by_key(|e| e.id);
        }
        Ok(())
    }

    pub fn player_index(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    pub fn monster_index(&self, name: &str) -> Option<usize> {
        self.monsters.iter().position(|m| m.name == name)
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.player_index(name).is_some()
    }

    pub fn monster(&self, name: &str) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.name == name)
    }

    pub fn monster_mut(&mut self, name: &str) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|m| m.name == name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// Append a player unless one with the same name is already present
    pub fn add_player(&mut self, player: Player) -> bool {
        if self.has_player(&player.name) {
            return false;
        }
        self.players.push(player);
        true
    }

    pub fn remove_player(&mut self, name: &str) -> Option<Player> {
        let index = self.player_index(name)?;
        Some(self.players.remove(index))
    }

    pub fn remove_monster(&mut self, name: &str) -> Option<Monster> {
        let index = self.monster_index(name)?;
        Some(self.monsters.remove(index))
    }

    /// Replace the monster with the same name, or append it
    pub fn upsert_monster(&mut self, monster: Monster) {
        match self.monster_index(&monster.name) {
            Some(index) => self.monsters[index] = monster,
            None => self.monsters.push(monster),
        }
    }

    /// Monsters first, then players, each in insertion order
    pub fn initiatives(&self) -> Vec<CharacterInitiative> {
        let monsters = self.monsters.iter().map(|m| CharacterInitiative {
            name: m.name.clone(),
            initiative: m.initiative,
            image: m.image.clone(),
            kind: CharacterKind::Monster,
        });
        let players = self.players.iter().map(|p| CharacterInitiative {
            name: p.name.clone(),
            initiative: p.initiative,
            image: p.image.clone(),
            kind: CharacterKind::Player,
        });
        monsters.chain(players).collect()
    }

    /// Initiative projection in acting order, lowest initiative first
    pub fn turn_order(&self) -> Vec<CharacterInitiative> {
        let mut order = self.initiatives();
        order.sort_by_key(|c| c.initiative);
        order
    }
}
