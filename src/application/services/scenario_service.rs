//! Scenario Service - Single source of truth for the in-progress encounter
//!
//! All mutation goes through the named operations below. Each mutation
//! publishes its notifications while still holding the write lock, so
//! subscribers observe changes in the order they were applied.
//!
//! Lookups against the retrieval port happen before the lock is taken. A
//! failed lookup leaves the scenario untouched and is returned to the caller.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{
    KeyValueStorePort, LookupError, RetrievalPort, StoreError,
};
use crate::application::services::scenario_notifier::ScenarioNotifier;
use crate::application::services::with_timeout;
use crate::domain::entities::{
    CharacterInitiative, Entity, InstanceSpec, Monster, ScenarioState,
};
use crate::domain::value_objects::MonsterStats;

/// Key under which the scenario is persisted
pub const STATE_KEY: &str = "state";

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Failed to serialize scenario: {0}")]
    Serialization(String),
    #[error("Saved scenario could not be loaded: {0}")]
    Deserialization(String),
    #[error("Global level must be at least 1, got {0}")]
    InvalidLevel(u32),
}

pub struct ScenarioService {
    retrieval: Arc<dyn RetrievalPort>,
    store: Arc<dyn KeyValueStorePort>,
    notifier: ScenarioNotifier,
    state: RwLock<ScenarioState>,
    lookup_timeout: Duration,
}

impl ScenarioService {
    pub fn new(
        retrieval: Arc<dyn RetrievalPort>,
        store: Arc<dyn KeyValueStorePort>,
        notifier: ScenarioNotifier,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            retrieval,
            store,
            notifier,
            state: RwLock::new(ScenarioState::default()),
            lookup_timeout,
        }
    }

    /// Register observers through the notifier's subscribe methods
    pub fn notifier(&self) -> &ScenarioNotifier {
        &self.notifier
    }

    /// A copy of the current scenario
    pub async fn state(&self) -> ScenarioState {
        self.state.read().await.clone()
    }

    pub async fn initiatives(&self) -> Vec<CharacterInitiative> {
        self.state.read().await.initiatives()
    }

    pub async fn turn_order(&self) -> Vec<CharacterInitiative> {
        self.state.read().await.turn_order()
    }

    async fn lookup<T>(
        &self,
        request: impl Future<Output = Result<T, LookupError>>,
    ) -> Result<T, LookupError> {
        with_timeout(self.lookup_timeout, request).await
    }

    async fn lookup_monster_stats(&self, name: &str, level: u32) -> Result<MonsterStats, LookupError> {
        let stats = self
            .lookup(self.retrieval.get_monster_stats(name, level))
            .await?;
        stats.validate().map_err(|reason| LookupError::InvalidStats {
            name: name.to_string(),
            reason,
        })?;
        Ok(stats)
    }

    /// Add a player by name. Returns `Ok(false)` if the player is already present.
    #[instrument(skip(self))]
    pub async fn add_player(&self, name: &str) -> Result<bool, ScenarioError> {
        if self.state.read().await.has_player(name) {
            debug!("Player already in scenario");
            return Ok(false);
        }

        let player = self
            .lookup(self.retrieval.get_player_info(name))
            .await
            .inspect_err(|e| warn!("Player lookup failed, scenario unchanged: {}", e))?;

        // Another request may have added the same player while we were waiting
        let mut state = self.state.write().await;
        if !state.add_player(player) {
            return Ok(false);
        }
        self.notifier.publish_initiative(state.initiatives());
        info!("Added player");
        Ok(true)
    }

    /// Remove a player by name. Returns `false` when no such player exists.
    #[instrument(skip(self))]
    pub async fn remove_player(&self, name: &str) -> bool {
        let mut state = self.state.write().await;
        if state.remove_player(name).is_none() {
            return false;
        }
        self.notifier.publish_initiative(state.initiatives());
        info!("Removed player");
        true
    }

    /// Spawn new entities for a monster group and upsert it into the scenario
    ///
    /// The new entities are appended to `monster.entities` and the list is
    /// re-sorted by id. The resulting group replaces any group of the same name.
    #[instrument(skip(self, monster), fields(monster = %monster.name, level = monster.level))]
    pub async fn add_monster(
        &self,
        mut monster: Monster,
        new_monsters: &[InstanceSpec],
    ) -> Result<Monster, ScenarioError> {
        let stats = self
            .lookup_monster_stats(&monster.name, monster.level)
            .await
            .inspect_err(|e| warn!("Monster stats lookup failed, scenario unchanged: {}", e))?;

        monster.spawn_entities(new_monsters, &stats);

        let mut state = self.state.write().await;
        state.upsert_monster(monster.clone());
        self.notifier.publish_monsters(state.monsters.clone());
        self.notifier.publish_initiative(state.initiatives());
        info!(entities = monster.entities.len(), "Updated monster group");
        Ok(monster)
    }

    /// Remove a monster group and all of its entities
    #[instrument(skip(self))]
    pub async fn remove_monster(&self, name: &str) -> bool {
        let mut state = self.state.write().await;
        if state.remove_monster(name).is_none() {
            return false;
        }
        self.notifier.publish_monsters(state.monsters.clone());
        self.notifier.publish_initiative(state.initiatives());
        info!("Removed monster group");
        true
    }

    /// The monster group in the scenario, or catalog metadata when absent
    ///
    /// Catalog results are not added to the scenario; their level is set to
    /// the current global level.
    #[instrument(skip(self))]
    pub async fn get_monster(&self, name: &str) -> Result<Monster, ScenarioError> {
        let global_level = {
            let state = self.state.read().await;
            if let Some(monster) = state.monster(name) {
                return Ok(monster.clone());
            }
            state.global_level
        };

        let mut monster = self.lookup(self.retrieval.get_monster_info(name)).await?;
        monster.level = global_level;
        Ok(monster)
    }

    #[instrument(skip(self))]
    pub async fn set_player_initiative(&self, name: &str, initiative: u32) -> bool {
        let mut state = self.state.write().await;
        let Some(player) = state.player_mut(name) else {
            return false;
        };
        player.initiative = initiative;
        self.notifier.publish_initiative(state.initiatives());
        true
    }

    #[instrument(skip(self))]
    pub async fn set_monster_initiative(&self, name: &str, initiative: u32) -> bool {
        let mut state = self.state.write().await;
        let Some(monster) = state.monster_mut(name) else {
            return false;
        };
        monster.initiative = initiative;
        self.notifier.publish_monsters(state.monsters.clone());
        self.notifier.publish_initiative(state.initiatives());
        true
    }

    /// Damage (negative delta) or heal an entity, clamped to its health range
    #[instrument(skip(self))]
    pub async fn adjust_entity_health(&self, monster: &str, id: u32, delta: i64) -> Option<Entity> {
        let entity = self
            .update_entity(monster, id, |entity| entity.adjust_health(delta))
            .await?;
        if entity.is_dead() {
            info!("Entity defeated");
        }
        Some(entity)
    }

    #[instrument(skip(self))]
    pub async fn set_entity_shield(&self, monster: &str, id: u32, shield: u32) -> Option<Entity> {
        self.update_entity(monster, id, |entity| entity.shield = shield)
            .await
    }

    async fn update_entity(
        &self,
        monster: &str,
        id: u32,
        update: impl FnOnce(&mut Entity),
    ) -> Option<Entity> {
        let mut state = self.state.write().await;
        let entity = state.monster_mut(monster)?.entity_mut(id)?;
        update(entity);
        let entity = entity.clone();
        self.notifier.publish_monsters(state.monsters.clone());
        Some(entity)
    }

    #[instrument(skip(self))]
    pub async fn remove_entity(&self, monster: &str, id: u32) -> bool {
        let mut state = self.state.write().await;
        let removed = state
            .monster_mut(monster)
            .and_then(|m| m.remove_entity(id))
            .is_some();
        if removed {
            self.notifier.publish_monsters(state.monsters.clone());
        }
        removed
    }

    #[instrument(skip(self))]
    pub async fn set_global_level(&self, level: u32) -> Result<(), ScenarioError> {
        if level == 0 {
            return Err(ScenarioError::InvalidLevel(level));
        }
        let mut state = self.state.write().await;
        state.global_level = level;
        self.notifier.publish_global_level(level);
        info!("Global level set");
        Ok(())
    }

    /// Advance the round counter, returning the new round number
    #[instrument(skip(self))]
    pub async fn update_round(&self) -> u32 {
        let mut state = self.state.write().await;
        state.rounds = state.rounds.saturating_add(1);
        self.notifier.publish_round(state.rounds);
        debug!(round = state.rounds, "Round advanced");
        state.rounds
    }

    #[instrument(skip(self))]
    pub async fn save_state(&self) -> Result<(), ScenarioError> {
        let json = {
            let state = self.state.read().await;
            serde_json::to_string(&*state)
                .map_err(|e| ScenarioError::Serialization(e.to_string()))?
        };
        self.store.set(STATE_KEY, &json).await?;
        info!("Scenario saved");
        Ok(())
    }

    /// Restore the saved scenario
    ///
    /// Returns `Ok(false)` if nothing was saved. A saved value that does not
    /// parse is rejected and the current scenario is kept. The restored round
    /// count is not re-published on the round channel.
    #[instrument(skip(self))]
    pub async fn load_state(&self) -> Result<bool, ScenarioError> {
        let Some(json) = self.store.get(STATE_KEY).await? else {
            debug!("No saved scenario");
            return Ok(false);
        };

        let mut loaded: ScenarioState = serde_json::from_str(&json).map_err(|e| {
            warn!("Rejected saved scenario: {}", e);
            ScenarioError::Deserialization(e.to_string())
        })?;
        loaded.normalize().map_err(|reason| {
            warn!("Rejected saved scenario: {}", reason);
            ScenarioError::Deserialization(reason)
        })?;

        let mut state = self.state.write().await;
        *state = loaded;
        self.notifier.publish_monsters(state.monsters.clone());
        self.notifier.publish_global_level(state.global_level);
        self.notifier.publish_initiative(state.initiatives());
        info!(
            players = state.players.len(),
            monsters = state.monsters.len(),
            "Scenario loaded"
        );
        Ok(true)
    }

    /// Return to an empty scenario and publish on every channel
    #[instrument(skip(self))]
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        *state = ScenarioState::default();
        self.notifier.publish_monsters(state.monsters.clone());
        self.notifier.publish_global_level(state.global_level);
        self.notifier.publish_round(state.rounds);
        self.notifier.publish_initiative(state.initiatives());
        info!("Scenario reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::broadcast::error::TryRecvError;

    use crate::domain::entities::{MonsterCard, Player};
    use crate::infrastructure::persistence::InMemoryKeyValueStore;
    use crate::infrastructure::retrieval::test_catalog;

    fn service_with_store(store: Arc<InMemoryKeyValueStore>) -> ScenarioService {
        ScenarioService::new(
            Arc::new(test_catalog()),
            store,
            ScenarioNotifier::new(16),
            Duration::from_millis(500),
        )
    }

    fn test_service() -> ScenarioService {
        service_with_store(Arc::new(InMemoryKeyValueStore::new()))
    }

    /// Retrieval that never answers, like a request lost on the network
    struct NeverResolves;

    #[async_trait]
    impl RetrievalPort for NeverResolves {
        async fn get_player_info(&self, _name: &str) -> Result<Player, LookupError> {
            std::future::pending().await
        }

        async fn get_monster_stats(&self, _name: &str, _level: u32) -> Result<MonsterStats, LookupError> {
            std::future::pending().await
        }

        async fn get_monster_info(&self, _name: &str) -> Result<Monster, LookupError> {
            std::future::pending().await
        }

        async fn get_monster_cards(&self, _name: &str, _level: u32) -> Result<Vec<MonsterCard>, LookupError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_add_player_twice_keeps_one() {
        let service = test_service();
        let mut initiative = service.notifier().subscribe_initiative();

        assert!(service.add_player("Brute").await.unwrap());
        assert!(!service.add_player("Brute").await.unwrap());

        let state = service.state().await;
        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[0].initiative, 25);

        assert_eq!(initiative.try_recv().unwrap().len(), 1);
        assert_eq!(initiative.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_failed_player_lookup_leaves_state_untouched() {
        let service = test_service();
        let mut initiative = service.notifier().subscribe_initiative();

        let result = service.add_player("Scoundrel").await;
        assert!(matches!(
            result,
            Err(ScenarioError::Lookup(LookupError::NotFound(_)))
        ));
        assert!(service.state().await.players.is_empty());
        assert_eq!(initiative.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_add_monster_then_get_monster_returns_sorted_entities() {
        let service = test_service();
        let mut monsters = service.notifier().subscribe_monsters();
        let mut initiative = service.notifier().subscribe_initiative();

        let guard = Monster::new("Bandit Guard", 1, 30);
        service
            .add_monster(
                guard,
                &[InstanceSpec::normal(5), InstanceSpec::elite(1), InstanceSpec::normal(3)],
            )
            .await
            .unwrap();

        let stored = service.get_monster("Bandit Guard").await.unwrap();
        let ids: Vec<_> = stored.entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert!(stored.entities[0].is_elite);
        assert_eq!(stored.entities[0].max_health, 9);
        assert_eq!(stored.entities[0].shield, 1);
        assert_eq!(stored.entities[1].current_health, 6);

        assert_eq!(monsters.try_recv().unwrap().len(), 1);
        let projected = initiative.try_recv().unwrap();
        assert_eq!(projected[0].name, "Bandit Guard");
        assert_eq!(projected[0].initiative, 30);
    }

    #[tokio::test]
    async fn test_add_monster_appends_to_existing_group() {
        let service = test_service();
        service
            .add_monster(Monster::new("Bandit Guard", 1, 30), &[InstanceSpec::normal(4)])
            .await
            .unwrap();

        let existing = service.get_monster("Bandit Guard").await.unwrap();
        service
            .add_monster(existing, &[InstanceSpec::elite(2)])
            .await
            .unwrap();

        let state = service.state().await;
        assert_eq!(state.monsters.len(), 1);
        let ids: Vec<_> = state.monsters[0].entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[tokio::test]
    async fn test_add_monster_rejects_invalid_stats() {
        let service = test_service();
        let result = service
            .add_monster(Monster::new("Cursed Totem", 1, 99), &[InstanceSpec::normal(1)])
            .await;

        assert!(matches!(
            result,
            Err(ScenarioError::Lookup(LookupError::InvalidStats { .. }))
        ));
        assert!(service.state().await.monsters.is_empty());
    }

    #[tokio::test]
    async fn test_add_monster_unknown_level_is_skipped() {
        let service = test_service();
        let result = service
            .add_monster(Monster::new("Bandit Guard", 6, 30), &[InstanceSpec::normal(1)])
            .await;

        assert!(matches!(
            result,
            Err(ScenarioError::Lookup(LookupError::NotFound(_)))
        ));
        assert!(service.state().await.monsters.is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_names_is_a_no_op() {
        let service = test_service();
        service.add_player("Brute").await.unwrap();
        service.set_global_level(3).await.unwrap();
        service.update_round().await;

        let before = service.state().await;
        let mut initiative = service.notifier().subscribe_initiative();
        let mut monsters = service.notifier().subscribe_monsters();

        assert!(!service.remove_player("Spellweaver").await);
        assert!(!service.remove_monster("Living Bones").await);

        assert_eq!(service.state().await, before);
        assert_eq!(initiative.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(monsters.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_remove_monster_rebroadcasts() {
        let service = test_service();
        service
            .add_monster(Monster::new("Bandit Guard", 1, 30), &[InstanceSpec::normal(1)])
            .await
            .unwrap();
        let mut monsters = service.notifier().subscribe_monsters();

        assert!(service.remove_monster("Bandit Guard").await);
        assert!(monsters.try_recv().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_monster_reads_through_to_catalog() {
        let service = test_service();
        service.set_global_level(2).await.unwrap();

        let monster = service.get_monster("Bandit Guard").await.unwrap();
        assert_eq!(monster.level, 2);
        assert_eq!(monster.image, "bandit-guard.png");
        assert!(monster.entities.is_empty());

        // Not cached into the scenario
        assert!(service.state().await.monsters.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_in_fresh_service() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let service = service_with_store(store.clone());
        service.add_player("Brute").await.unwrap();
        service.add_player("Tinkerer").await.unwrap();
        service
            .add_monster(Monster::new("Bandit Guard", 1, 30), &[InstanceSpec::elite(2)])
            .await
            .unwrap();
        service.set_global_level(4).await.unwrap();
        service.update_round().await;
        service.update_round().await;
        service.save_state().await.unwrap();

        let restored = service_with_store(store);
        let mut monsters = restored.notifier().subscribe_monsters();
        let mut levels = restored.notifier().subscribe_global_level();
        let mut rounds = restored.notifier().subscribe_rounds();
        let mut initiative = restored.notifier().subscribe_initiative();

        assert!(restored.load_state().await.unwrap());

        let original = service.state().await;
        let loaded = restored.state().await;
        assert_eq!(loaded.players, original.players);
        assert_eq!(loaded.monsters, original.monsters);
        assert_eq!(loaded.global_level, 4);
        // Round count is restored into state but not re-published
        assert_eq!(loaded.rounds, 2);

        assert_eq!(monsters.try_recv().unwrap().len(), 1);
        assert_eq!(levels.try_recv(), Ok(4));
        assert_eq!(initiative.try_recv().unwrap().len(), 3);
        assert_eq!(rounds.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_load_without_saved_state() {
        let service = test_service();
        assert!(!service.load_state().await.unwrap());
    }

    #[tokio::test]
    async fn test_load_rejects_mismatched_shape_and_keeps_state() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store
            .set(STATE_KEY, r#"{"players": "nobody", "globalLevel": 2}"#)
            .await
            .unwrap();
        let service = service_with_store(store.clone());
        service.add_player("Brute").await.unwrap();

        let result = service.load_state().await;
        assert!(matches!(result, Err(ScenarioError::Deserialization(_))));
        assert_eq!(service.state().await.players.len(), 1);

        store
            .set(STATE_KEY, r#"{"players": [], "monsters": [], "globalLevel": 0, "rounds": 0}"#)
            .await
            .unwrap();
        assert!(matches!(
            service.load_state().await,
            Err(ScenarioError::Deserialization(_))
        ));
        assert_eq!(service.state().await.players.len(), 1);
    }

    #[tokio::test]
    async fn test_load_rejects_duplicate_names_and_keeps_state() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let saved = ScenarioState {
            players: vec![Player::new("Brute", 20), Player::new("Brute", 55)],
            ..ScenarioState::default()
        };
        store
            .set(STATE_KEY, &serde_json::to_string(&saved).unwrap())
            .await
            .unwrap();

        let service = service_with_store(store.clone());
        service.add_player("Tinkerer").await.unwrap();
        let mut initiative = service.notifier().subscribe_initiative();

        assert!(matches!(
            service.load_state().await,
            Err(ScenarioError::Deserialization(_))
        ));
        let state = service.state().await;
        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[0].name, "Tinkerer");
        assert_eq!(initiative.try_recv(), Err(TryRecvError::Empty));

        let saved = ScenarioState {
            monsters: vec![
                Monster::new("Bandit Guard", 1, 30),
                Monster::new("Bandit Guard", 2, 15),
            ],
            ..ScenarioState::default()
        };
        store
            .set(STATE_KEY, &serde_json::to_string(&saved).unwrap())
            .await
            .unwrap();
        assert!(matches!(
            service.load_state().await,
            Err(ScenarioError::Deserialization(_))
        ));
        assert!(service.state().await.monsters.is_empty());
    }

    #[tokio::test]
    async fn test_load_sorts_entities_by_id() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let writer = service_with_store(store.clone());
        writer
            .add_monster(
                Monster::new("Bandit Guard", 1, 30),
                &[InstanceSpec::normal(1), InstanceSpec::elite(4), InstanceSpec::normal(7)],
            )
            .await
            .unwrap();
        let mut saved = writer.state().await;
        saved.monsters[0].entities.reverse();
        store
            .set(STATE_KEY, &serde_json::to_string(&saved).unwrap())
            .await
            .unwrap();

        let service = service_with_store(store);
        assert!(service.load_state().await.unwrap());
        let ids: Vec<_> = service.state().await.monsters[0]
            .entities
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1, 4, 7]);
    }

    #[tokio::test]
    async fn test_round_counter_saturates() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let saved = ScenarioState {
            rounds: u32::MAX,
            ..ScenarioState::default()
        };
        store
            .set(STATE_KEY, &serde_json::to_string(&saved).unwrap())
            .await
            .unwrap();

        let service = service_with_store(store);
        service.load_state().await.unwrap();
        assert_eq!(service.update_round().await, u32::MAX);
    }

    #[tokio::test]
    async fn test_reset_publishes_every_channel() {
        let service = test_service();
        service.add_player("Brute").await.unwrap();
        service.set_global_level(5).await.unwrap();
        service.update_round().await;

        let mut monsters = service.notifier().subscribe_monsters();
        let mut levels = service.notifier().subscribe_global_level();
        let mut rounds = service.notifier().subscribe_rounds();
        let mut initiative = service.notifier().subscribe_initiative();

        service.reset().await;

        assert_eq!(service.state().await, ScenarioState::default());
        assert!(monsters.try_recv().unwrap().is_empty());
        assert_eq!(levels.try_recv(), Ok(1));
        assert_eq!(rounds.try_recv(), Ok(0));
        assert!(initiative.try_recv().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_global_level_and_rounds() {
        let service = test_service();
        let mut rounds = service.notifier().subscribe_rounds();

        assert!(matches!(
            service.set_global_level(0).await,
            Err(ScenarioError::InvalidLevel(0))
        ));
        assert_eq!(service.state().await.global_level, 1);

        assert_eq!(service.update_round().await, 1);
        assert_eq!(service.update_round().await, 2);
        assert_eq!(rounds.try_recv(), Ok(1));
        assert_eq!(rounds.try_recv(), Ok(2));
    }

    #[tokio::test]
    async fn test_entity_tracking() {
        let service = test_service();
        service
            .add_monster(
                Monster::new("Bandit Guard", 1, 30),
                &[InstanceSpec::normal(1), InstanceSpec::elite(2)],
            )
            .await
            .unwrap();

        let hurt = service.adjust_entity_health("Bandit Guard", 2, -4).await.unwrap();
        assert_eq!(hurt.current_health, 5);

        let shielded = service.set_entity_shield("Bandit Guard", 1, 2).await.unwrap();
        assert_eq!(shielded.shield, 2);

        assert!(service.adjust_entity_health("Bandit Guard", 9, -1).await.is_none());
        assert!(service.adjust_entity_health("Living Bones", 1, -1).await.is_none());

        assert!(service.remove_entity("Bandit Guard", 1).await);
        assert!(!service.remove_entity("Bandit Guard", 1).await);
        assert_eq!(service.state().await.monsters[0].entities.len(), 1);
    }

    #[tokio::test]
    async fn test_initiative_updates() {
        let service = test_service();
        service.add_player("Tinkerer").await.unwrap();
        service
            .add_monster(Monster::new("Bandit Guard", 1, 30), &[])
            .await
            .unwrap();

        assert!(service.set_player_initiative("Tinkerer", 80).await);
        assert!(service.set_monster_initiative("Bandit Guard", 15).await);
        assert!(!service.set_player_initiative("Brute", 5).await);

        let order: Vec<_> = service.turn_order().await.into_iter().map(|c| c.name).collect();
        assert_eq!(order, vec!["Bandit Guard", "Tinkerer"]);
    }

    #[tokio::test]
    async fn test_unresponsive_lookup_times_out() {
        let service = ScenarioService::new(
            Arc::new(NeverResolves),
            Arc::new(InMemoryKeyValueStore::new()),
            ScenarioNotifier::new(4),
            Duration::from_millis(20),
        );

        let result = service.add_player("Brute").await;
        assert!(matches!(
            result,
            Err(ScenarioError::Lookup(LookupError::Timeout(_)))
        ));
        assert!(service.state().await.players.is_empty());
    }
}
