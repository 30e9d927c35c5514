//! Key-value store backends
//!
//! The repository only needs an asynchronous string-to-string mapping.
//! `MemoryStore` is the in-process fake, `SqliteStore` persists to disk.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{default_data_dir, SqliteStore};

use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;

/// Asynchronous, persistent string-keyed store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if the slot is empty
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Remove every key
    async fn clear(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        (**self).clear().await
    }
}
