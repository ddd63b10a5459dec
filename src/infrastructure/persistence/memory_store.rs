use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{KeyValueStorePort, StoreError};

/// Process-local key/value store; contents are lost on exit
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorePort for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("state").await.unwrap(), None);

        store.set("state", "{}").await.unwrap();
        store.set("state", "{\"rounds\":1}").await.unwrap();
        assert_eq!(
            store.get("state").await.unwrap().as_deref(),
            Some("{\"rounds\":1}")
        );
    }
}
