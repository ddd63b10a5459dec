//! Value objects - Immutable objects defined by their attributes

mod ids;
mod stats;

pub use ids::*;
pub use stats::{MonsterStats, Stats};
