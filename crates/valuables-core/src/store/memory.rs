//! In-memory key-value store
//!
//! Process-local, lost on exit. Used for tests and `--memory` sessions.

use super::KeyValueStore;
use crate::error::StoreError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.entries.write().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("valuables").await.unwrap(), None);

        store.set("valuables", "[]").await.unwrap();
        assert_eq!(store.get("valuables").await.unwrap().as_deref(), Some("[]"));

        store.remove("valuables").await.unwrap();
        assert_eq!(store.get("valuables").await.unwrap(), None);

        // Removing again is fine
        store.remove("valuables").await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_store_clear() {
        let store = MemoryStore::new();
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        assert_eq!(store.len(), 2);

        store.clear().await.unwrap();
        assert!(store.is_empty());
    }
}
