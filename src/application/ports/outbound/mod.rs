//! Outbound ports - Interfaces that the application requires from external systems

mod key_value_port;
mod retrieval_port;

pub use key_value_port::{KeyValueStorePort, StoreError};
pub use retrieval_port::{LookupError, RetrievalPort};
