//! Domain entities - Decks, combatants and the scenario aggregate

mod card;
mod deck;
mod modifier_deck;
mod monster;
mod monster_deck;
mod player;
mod scenario;

pub use card::MonsterCard;
pub use deck::{Deck, DeckCard, DeckError};
pub use modifier_deck::{ModifierCard, ModifierDeck, MAX_CONSUMABLES};
pub use monster::{Entity, InstanceSpec, Monster, MonsterStatus};
pub use monster_deck::MonsterDeck;
pub use player::Player;
pub use scenario::{CharacterInitiative, CharacterKind, ScenarioState, DEFAULT_GLOBAL_LEVEL};
