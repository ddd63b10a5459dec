//! Scenario notifier - Observer registration for scenario changes
//!
//! Four independent broadcast channels carry the latest initiative
//! projection, monster list, global level and round count. A subscriber only
//! receives values published after it subscribed; there is no replay. A
//! subscriber that falls more than `capacity` values behind skips ahead and
//! sees `RecvError::Lagged`.

use tokio::sync::broadcast;

use crate::domain::entities::{CharacterInitiative, Monster};

pub struct ScenarioNotifier {
    initiative: broadcast::Sender<Vec<CharacterInitiative>>,
    monsters: broadcast::Sender<Vec<Monster>>,
    global_level: broadcast::Sender<u32>,
    rounds: broadcast::Sender<u32>,
}

impl ScenarioNotifier {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            initiative: broadcast::channel(capacity).0,
            monsters: broadcast::channel(capacity).0,
            global_level: broadcast::channel(capacity).0,
            rounds: broadcast::channel(capacity).0,
        }
    }

    pub fn subscribe_initiative(&self) -> broadcast::Receiver<Vec<CharacterInitiative>> {
        self.initiative.subscribe()
    }

    pub fn subscribe_monsters(&self) -> broadcast::Receiver<Vec<Monster>> {
        self.monsters.subscribe()
    }

    pub fn subscribe_global_level(&self) -> broadcast::Receiver<u32> {
        self.global_level.subscribe()
    }

    pub fn subscribe_rounds(&self) -> broadcast::Receiver<u32> {
        self.rounds.subscribe()
    }

    // Sending with no subscribers is not an error for us

    pub(crate) fn publish_initiative(&self, initiatives: Vec<CharacterInitiative>) {
        let _ = self.initiative.send(initiatives);
    }

    pub(crate) fn publish_monsters(&self, monsters: Vec<Monster>) {
        let _ = self.monsters.send(monsters);
    }

    pub(crate) fn publish_global_level(&self, level: u32) {
        let _ = self.global_level.send(level);
    }

    pub(crate) fn publish_round(&self, round: u32) {
        let _ = self.rounds.send(round);
    }
}

impl Default for ScenarioNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn test_no_replay_for_late_subscribers() {
        let notifier = ScenarioNotifier::new(8);
        notifier.publish_round(1);

        let mut rounds = notifier.subscribe_rounds();
        assert_eq!(rounds.try_recv(), Err(TryRecvError::Empty));

        notifier.publish_round(2);
        assert_eq!(rounds.try_recv(), Ok(2));
    }

    #[test]
    fn test_channels_are_independent() {
        let notifier = ScenarioNotifier::new(8);
        let mut levels = notifier.subscribe_global_level();
        let mut rounds = notifier.subscribe_rounds();

        notifier.publish_global_level(3);

        assert_eq!(levels.try_recv(), Ok(3));
        assert_eq!(rounds.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_every_subscriber_gets_each_value() {
        let notifier = ScenarioNotifier::new(8);
        let mut first = notifier.subscribe_monsters();
        let mut second = notifier.subscribe_monsters();

        notifier.publish_monsters(vec![Monster::new("Bandit Guard", 1, 30)]);

        assert_eq!(first.try_recv().unwrap()[0].name, "Bandit Guard");
        assert_eq!(second.try_recv().unwrap().len(), 1);
    }
}
