//! Persistence helper for the valuables list
//!
//! The whole inventory lives under one key as a JSON array, newest first.
//! Every operation re-reads the slot, so nothing is cached in memory and
//! each insert or delete rewrites the full list.
//!
//! Ids come from a counter stored next to the list under `<key>:next_id`.
//! They are never reused while the list exists, so deleting an item cannot
//! make a later insert collide with a surviving record.

use crate::error::{CoreError, Result};
use crate::event::{EventBus, InventoryEvent};
use crate::inventory::InventorySummary;
use crate::store::KeyValueStore;
use crate::validation::ValueLimits;
use std::fmt;
use tracing::{debug, info, warn};
use valuables_types::{Item, NewItem};

/// Storage keys
pub mod keys {
    /// Slot holding the inventory list
    pub const VALUABLES: &str = "valuables";

    /// Slot holding the next id for the list stored under `key`
    pub fn next_id(key: &str) -> String {
        format!("{}:next_id", key)
    }
}

/// Configuration for the repository
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Store key holding the list
    pub key: String,

    /// Value ceiling used by the add form
    pub limits: ValueLimits,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            key: keys::VALUABLES.to_string(),
            limits: ValueLimits::default(),
        }
    }
}

/// Result of [`ValuablesRepository::insert`]
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// Stored with its assigned id
    Inserted(Item),
    /// A record with the same name already exists; nothing was written
    Duplicate { name: String },
}

impl InsertOutcome {
    /// Marker shown for a rejected duplicate
    pub const DUPLICATE_MESSAGE: &'static str = "duplicate data";

    pub fn is_duplicate(&self) -> bool {
        matches!(self, InsertOutcome::Duplicate { .. })
    }

    pub fn item(&self) -> Option<&Item> {
        match self {
            InsertOutcome::Inserted(item) => Some(item),
            InsertOutcome::Duplicate { .. } => None,
        }
    }
}

impl fmt::Display for InsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertOutcome::Inserted(item) => write!(f, "Added {}", item.name),
            InsertOutcome::Duplicate { .. } => f.write_str(Self::DUPLICATE_MESSAGE),
        }
    }
}

/// Result of [`ValuablesRepository::delete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Number of records removed (0 when nothing matched or no list exists)
    pub removed: usize,
}

/// Repository over an injected key-value store
pub struct ValuablesRepository<S> {
    store: S,
    config: RepositoryConfig,
    event_bus: EventBus,
}

impl<S: KeyValueStore> ValuablesRepository<S> {
    pub fn new(store: S, config: RepositoryConfig) -> Self {
        Self {
            store,
            config,
            event_bus: EventBus::default(),
        }
    }

    /// Create with default configuration (key `valuables`)
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, RepositoryConfig::default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.config.key
    }

    pub fn limits(&self) -> &ValueLimits {
        &self.config.limits
    }

    /// Get the event bus for subscribing to updates
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Read the stored list, `None` if nothing has been stored yet
    pub async fn list_raw(&self) -> Result<Option<Vec<Item>>> {
        let key = self.key();
        let raw = self
            .store
            .get(key)
            .await
            .map_err(|e| CoreError::read(key, e))?;

        let Some(raw) = raw else {
            debug!(key, "No stored list");
            return Ok(None);
        };

        // A stored `null` reads as an empty slot
        let items: Option<Vec<Item>> = serde_json::from_str(&raw).map_err(|source| {
            warn!(key, error = %source, "Stored list is not valid JSON");
            CoreError::Decode {
                key: key.to_string(),
                source,
            }
        })?;

        Ok(items)
    }

    /// Read the stored list, newest first. Empty if nothing is stored.
    pub async fn list(&self) -> Result<Vec<Item>> {
        Ok(self.list_raw().await?.unwrap_or_default())
    }

    /// Prepend a new item unless one with the same name exists
    pub async fn insert(&self, item: NewItem) -> Result<InsertOutcome> {
        let key = self.key();
        if !item.purchase_price.is_finite() {
            warn!(
                key,
                name = %item.name,
                price = item.purchase_price,
                "Rejected non-finite price"
            );
            return Err(CoreError::InvalidPrice {
                name: item.name,
                price: item.purchase_price,
            });
        }

        let mut items = self.list().await?;

        if items.iter().any(|existing| existing.name == item.name) {
            info!(key, name = %item.name, "Rejected duplicate item");
            return Ok(InsertOutcome::Duplicate { name: item.name });
        }

        let id = self.next_id(&items).await?;
        let record = Item::from_new(item, id);
        items.insert(0, record.clone());

        // Counter first: a failed list write then only skips an id
        self.store
            .set(&keys::next_id(key), &(id + 1).to_string())
            .await
            .map_err(|e| CoreError::write(key, e))?;
        self.write_list(&items).await?;

        info!(key, id, name = %record.name, count = items.len(), "Item stored");
        self.event_bus.publish(InventoryEvent::ItemInserted(record.name.clone()));

        Ok(InsertOutcome::Inserted(record))
    }

    /// Remove every record named `name`
    ///
    /// A missing list is a no-op and writes nothing.
    pub async fn delete(&self, name: &str) -> Result<DeleteOutcome> {
        let key = self.key();
        let Some(mut items) = self.list_raw().await? else {
            debug!(key, name, "Delete on empty slot ignored");
            return Ok(DeleteOutcome { removed: 0 });
        };

        let before = items.len();
        items.retain(|item| item.name != name);
        let removed = before - items.len();

        self.write_list(&items).await?;

        info!(key, name, removed, "Items deleted");
        if removed > 0 {
            self.event_bus.publish(InventoryEvent::ItemsDeleted {
                name: name.to_string(),
                removed,
            });
        }

        Ok(DeleteOutcome { removed })
    }

    /// Remove the stored list and its id counter
    pub async fn clear(&self) -> Result<()> {
        let key = self.key();
        self.store
            .remove(key)
            .await
            .map_err(|e| CoreError::write(key, e))?;
        self.store
            .remove(&keys::next_id(key))
            .await
            .map_err(|e| CoreError::write(key, e))?;

        info!(key, "Inventory cleared");
        self.event_bus.publish(InventoryEvent::Cleared);
        Ok(())
    }

    /// Count and total value of the stored list
    pub async fn summary(&self) -> Result<InventorySummary> {
        let items = self.list().await?;
        Ok(InventorySummary::from_items(&items, self.config.limits))
    }

    async fn write_list(&self, items: &[Item]) -> Result<()> {
        let key = self.key();
        let json = serde_json::to_string(items).map_err(|source| CoreError::Encode { source })?;
        self.store
            .set(key, &json)
            .await
            .map_err(|e| CoreError::write(key, e))
    }

    /// Next id to assign, never below anything already in `items`
    async fn next_id(&self, items: &[Item]) -> Result<u64> {
        let key = self.key();
        let counter_key = keys::next_id(key);
        let stored = self
            .store
            .get(&counter_key)
            .await
            .map_err(|e| CoreError::read(key, e))?
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(next) => Some(next),
                Err(_) => {
                    warn!(key = %counter_key, raw = %raw, "Ignoring unreadable id counter");
                    None
                }
            });

        let max_id = items.iter().filter_map(|item| item.id).max().unwrap_or(0);
        let floor = max_id.max(items.len() as u64) + 1;

        Ok(stored.map_or(floor, |next| next.max(floor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn rubles() -> NewItem {
        NewItem::new("Priced Rubles", 400.0)
    }

    #[tokio::test]
    async fn test_list_empty_slot() {
        let repo = ValuablesRepository::with_defaults(MemoryStore::new());

        assert_eq!(repo.list_raw().await.unwrap(), None);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_first_insert_gets_id_one() {
        let repo = ValuablesRepository::with_defaults(MemoryStore::new());

        let outcome = repo.insert(rubles()).await.unwrap();
        let stored = outcome.item().unwrap();
        assert_eq!(stored.id, Some(1));

        let items = repo.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Priced Rubles");
        assert_eq!(items[0].purchase_price, 400.0);
    }

    #[tokio::test]
    async fn test_duplicate_displays_marker() {
        let repo = ValuablesRepository::with_defaults(MemoryStore::new());
        repo.insert(rubles()).await.unwrap();

        let outcome = repo.insert(rubles()).await.unwrap();
        assert!(outcome.is_duplicate());
        assert_eq!(outcome.to_string(), "duplicate data");
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stored_null_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(keys::VALUABLES, "null").await.unwrap();
        let repo = ValuablesRepository::with_defaults(store);

        assert_eq!(repo.list_raw().await.unwrap(), None);
        let outcome = repo.insert(rubles()).await.unwrap();
        assert_eq!(outcome.item().unwrap().id, Some(1));
    }

    #[tokio::test]
    async fn test_corrupt_list_is_decode_error() {
        let store = MemoryStore::new();
        store.set(keys::VALUABLES, "{not json").await.unwrap();
        let repo = ValuablesRepository::with_defaults(store);

        let err = repo.list().await.unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));

        // Insert refuses to overwrite data it cannot read
        assert!(repo.insert(rubles()).await.is_err());
    }

    #[tokio::test]
    async fn test_non_finite_price_is_rejected_before_writing() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let repo = ValuablesRepository::with_defaults(store.clone());
        repo.insert(rubles()).await.unwrap();
        let before = store.get(keys::VALUABLES).await.unwrap();

        for price in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let err = repo.insert(NewItem::new("Ghost", price)).await.unwrap_err();
            assert!(matches!(err, CoreError::InvalidPrice { ref name, .. } if name == "Ghost"));
        }

        assert_eq!(store.get(keys::VALUABLES).await.unwrap(), before);
        assert_eq!(store.get("valuables:next_id").await.unwrap().as_deref(), Some("2"));

        // The list stays readable and writable
        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert_eq!(repo.delete("Priced Rubles").await.unwrap().removed, 1);
    }

    #[tokio::test]
    async fn test_legacy_list_seeds_counter() {
        let store = MemoryStore::new();
        store
            .set(
                keys::VALUABLES,
                r#"[{"id":2,"name":"Gold","purchasePrice":100,"type":"","description":"","photo":""},
                    {"name":"Rubles","purchasePrice":400,"type":"","description":"","photo":""}]"#,
            )
            .await
            .unwrap();
        let repo = ValuablesRepository::with_defaults(store);

        let outcome = repo.insert(NewItem::new("Silver", 50.0)).await.unwrap();
        assert_eq!(outcome.item().unwrap().id, Some(3));
    }

    #[tokio::test]
    async fn test_custom_key_is_isolated() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let default_repo = ValuablesRepository::with_defaults(store.clone());
        let other = ValuablesRepository::new(
            store.clone(),
            RepositoryConfig {
                key: "archive".to_string(),
                ..Default::default()
            },
        );

        default_repo.insert(rubles()).await.unwrap();

        assert!(other.list().await.unwrap().is_empty());
        assert_eq!(other.key(), "archive");
        assert!(store.get("archive:next_id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_summary_totals_prices() {
        let repo = ValuablesRepository::with_defaults(MemoryStore::new());
        repo.insert(rubles()).await.unwrap();
        repo.insert(NewItem::new("Priced Gold", 100.0)).await.unwrap();

        let summary = repo.summary().await.unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_value, 500.0);
    }
}
