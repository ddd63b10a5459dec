//! Key/value persistence adapters for the saved scenario

mod memory_store;
mod sqlite_store;

pub use memory_store::InMemoryKeyValueStore;
pub use sqlite_store::SqliteKeyValueStore;
