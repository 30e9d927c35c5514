//! Error types for valuables-core
//!
//! Store failures keep the backend's message verbatim so callers can show it
//! as is; everything else gets a descriptive variant.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a key-value store backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend-specific failure, carried as its message
    #[error("{0}")]
    Backend(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

/// Core error type for valuables operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // Store Errors
    // ===================
    /// Reading the slot failed. Displays as the backend message only.
    #[error("{message}")]
    StoreRead { key: String, message: String },

    /// Writing or removing the slot failed. Displays as the backend message only.
    #[error("{message}")]
    StoreWrite { key: String, message: String },

    #[error("Failed to open store at {path}: {message}")]
    StoreOpen { path: PathBuf, message: String },

    // ===================
    // Encoding Errors
    // ===================
    #[error("Stored data under '{key}' is not a valid item list: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode item list: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    // ===================
    // Input Errors
    // ===================
    /// JSON has no encoding for NaN or infinity, so such a price would
    /// corrupt the stored list
    #[error("Price of '{name}' must be a finite number, got {price}")]
    InvalidPrice { name: String, price: f64 },

    #[error("Invalid form fields: {}", fields.join(", "))]
    InvalidForm { fields: Vec<String> },
}

impl CoreError {
    pub(crate) fn read(key: &str, error: StoreError) -> Self {
        CoreError::StoreRead {
            key: key.to_string(),
            message: error.to_string(),
        }
    }

    pub(crate) fn write(key: &str, error: StoreError) -> Self {
        CoreError::StoreWrite {
            key: key.to_string(),
            message: error.to_string(),
        }
    }

    /// True for failures coming from the underlying store
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            CoreError::StoreRead { .. } | CoreError::StoreWrite { .. } | CoreError::StoreOpen { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
