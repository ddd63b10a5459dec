//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite and in-memory key/value stores
//! - Retrieval: JSON file and HTTP catalog clients
//! - HTTP: REST API routes
//! - WebSocket: Push of scenario notifications to clients
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod persistence;
pub mod retrieval;
pub mod state;
pub mod websocket;
