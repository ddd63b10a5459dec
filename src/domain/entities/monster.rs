//! Monster group and its spawned entities

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{MonsterStats, Stats};

/// Stat tier of a spawned monster instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonsterStatus {
    Normal,
    Elite,
}

/// Request to spawn one monster instance with the given standee number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSpec {
    pub id: u32,
    pub status: MonsterStatus,
}

impl InstanceSpec {
    pub fn normal(id: u32) -> Self {
        Self {
            id,
            status: MonsterStatus::Normal,
        }
    }

    pub fn elite(id: u32) -> Self {
        Self {
            id,
            status: MonsterStatus::Elite,
        }
    }
}

/// One spawned monster instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: u32,
    pub is_elite: bool,
    pub current_health: u32,
    pub max_health: u32,
    pub shield: u32,
}

impl Entity {
    /// Spawn an entity at full health using the tier matching `spec.status`
    pub fn spawn(spec: InstanceSpec, stats: &MonsterStats) -> Self {
        let (is_elite, tier): (bool, &Stats) = match spec.status {
            MonsterStatus::Elite => (true, &stats.elite_stats),
            MonsterStatus::Normal => (false, &stats.normal_stats),
        };
        Self {
            id: spec.id,
            is_elite,
            current_health: tier.health,
            max_health: tier.health,
            shield: tier.shield,
        }
    }

    /// Apply damage (negative) or healing (positive), clamped to `[0, max_health]`
    pub fn adjust_health(&mut self, delta: i64) {
        let health = i64::from(self.current_health).saturating_add(delta);
        self.current_health = health.clamp(0, i64::from(self.max_health)) as u32;
    }

    pub fn is_dead(&self) -> bool {
        self.current_health == 0
    }
}

/// A monster group: one species at one level, with its spawned entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub level: u32,
    pub initiative: u32,
    #[serde(default)]
    pub image: String,
    /// Spawned instances, kept sorted by id
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Monster {
    pub fn new(name: impl Into<String>, level: u32, initiative: u32) -> Self {
        Self {
            name: name.into(),
            level,
            initiative,
            image: String::new(),
            entities: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Spawn new entities and keep the list ordered by id
    ///
    /// The sort is stable, so entities sharing an id keep their insertion order.
    pub fn spawn_entities(&mut self, specs: &[InstanceSpec], stats: &MonsterStats) {
        self.entities
            .extend(specs.iter().map(|spec| Entity::spawn(*spec, stats)));
        self.entities.sort_by_key(|e| e.id);
    }

    pub fn entity_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Remove the first entity with the given id
    pub fn remove_entity(&mut self, id: u32) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> MonsterStats {
        MonsterStats::new(Stats::new(5, 0), Stats::new(9, 1))
    }

    #[test]
    fn test_spawn_uses_tier_stats() {
        let normal = Entity::spawn(InstanceSpec::normal(1), &stats());
        assert!(!normal.is_elite);
        assert_eq!((normal.current_health, normal.max_health, normal.shield), (5, 5, 0));

        let elite = Entity::spawn(InstanceSpec::elite(2), &stats());
        assert!(elite.is_elite);
        assert_eq!((elite.current_health, elite.max_health, elite.shield), (9, 9, 1));
    }

    #[test]
    fn test_spawn_entities_sorted_and_stable() {
        let mut monster = Monster::new("Bandit Guard", 1, 30);
        monster.spawn_entities(&[InstanceSpec::normal(4), InstanceSpec::elite(2)], &stats());
        monster.spawn_entities(&[InstanceSpec::normal(3), InstanceSpec::elite(4)], &stats());

        let ids: Vec<_> = monster.entities.iter().map(|e| (e.id, e.is_elite)).collect();
        assert_eq!(ids, vec![(2, true), (3, false), (4, false), (4, true)]);
    }

    #[test]
    fn test_adjust_health_clamps() {
        let mut entity = Entity::spawn(InstanceSpec::normal(1), &stats());
        entity.adjust_health(-3);
        assert_eq!(entity.current_health, 2);
        entity.adjust_health(10);
        assert_eq!(entity.current_health, 5);
        entity.adjust_health(-99);
        assert_eq!(entity.current_health, 0);
        assert!(entity.is_dead());
    }

    #[test]
    fn test_adjust_health_extreme_deltas() {
        let mut entity = Entity::spawn(InstanceSpec::normal(1), &stats());
        entity.adjust_health(i64::MAX);
        assert_eq!(entity.current_health, 5);
        entity.adjust_health(i64::MIN);
        assert_eq!(entity.current_health, 0);
        entity.adjust_health(i64::MAX);
        assert_eq!(entity.current_health, 5);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let spec: InstanceSpec = serde_json::from_str(r#"{"id": 3, "status": "elite"}"#).unwrap();
        assert_eq!(spec, InstanceSpec::elite(3));
    }
}
