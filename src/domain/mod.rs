//! Domain layer - Core combat-tracking rules with no external dependencies
//!
//! This layer contains:
//! - Entities: Decks, cards, players, monsters and the scenario aggregate
//! - Value Objects: Identifiers and monster stat blocks
//! - Domain Events: Notifications pushed when scenario state changes

pub mod entities;
pub mod events;
pub mod value_objects;
