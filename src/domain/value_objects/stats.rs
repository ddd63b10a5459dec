//! Monster stat blocks returned by the catalog
//!
//! Stats are validated once at the lookup boundary so the rest of the
//! engine can trust that every spawned entity starts alive.

use serde::{Deserialize, Serialize};

/// Health and shield for one stat tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub health: u32,
    #[serde(default)]
    pub shield: u32,
}

impl Stats {
    pub fn new(health: u32, shield: u32) -> Self {
        Self { health, shield }
    }
}

/// Normal and elite stats for a monster species at a given level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterStats {
    pub normal_stats: Stats,
    pub elite_stats: Stats,
}

impl MonsterStats {
    pub fn new(normal_stats: Stats, elite_stats: Stats) -> Self {
        Self {
            normal_stats,
            elite_stats,
        }
    }

    /// Check that both tiers describe a living monster
    pub fn validate(&self) -> Result<(), String> {
        if self.normal_stats.health == 0 {
            return Err("normal health must be at least 1".to_string());
        }
        if self.elite_stats.health == 0 {
            return Err("elite health must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_health() {
        let stats = MonsterStats::new(Stats::new(0, 0), Stats::new(9, 1));
        assert!(stats.validate().is_err());

        let stats = MonsterStats::new(Stats::new(5, 0), Stats::new(0, 1));
        assert!(stats.validate().is_err());

        let stats = MonsterStats::new(Stats::new(5, 0), Stats::new(9, 1));
        assert!(stats.validate().is_ok());
    }

    #[test]
    fn test_shield_defaults_to_zero() {
        let stats: MonsterStats = serde_json::from_str(
            r#"{"normalStats": {"health": 4}, "eliteStats": {"health": 7, "shield": 1}}"#,
        )
        .unwrap();
        assert_eq!(stats.normal_stats, Stats::new(4, 0));
        assert_eq!(stats.elite_stats, Stats::new(7, 1));
    }
}
