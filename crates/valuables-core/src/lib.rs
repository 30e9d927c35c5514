//! valuables-core - Core library for valuables
//!
//! Provides the key-value store backends, the inventory repository, form
//! validation and price formatting.

pub mod error;
pub mod event;
pub mod form;
pub mod format;
pub mod inventory;
pub mod repository;
pub mod store;
pub mod validation;

pub use error::{CoreError, StoreError};
pub use event::{EventBus, InventoryEvent};
pub use form::{FormErrors, ItemForm};
pub use format::{format_amount, format_price};
pub use inventory::{Card, InventorySummary};
pub use repository::{DeleteOutcome, InsertOutcome, RepositoryConfig, ValuablesRepository};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
pub use validation::{FieldValidation, PhotoSelection, ValueLimits};
pub use valuables_types::{Item, NewItem};
