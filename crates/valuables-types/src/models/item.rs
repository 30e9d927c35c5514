//! Item records as persisted in the `valuables` slot
//!
//! Field names on disk are camelCase (`purchasePrice`) and the item kind is
//! stored under `type`, so existing stored lists decode unchanged.

use serde::{Deserialize, Serialize};

/// One stored valuable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Identifier assigned at insert time.
    ///
    /// Absent on records written before ids were tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Display name, also the de-duplication and deletion key
    pub name: String,

    /// Purchase price in euros
    pub purchase_price: f64,

    /// Item kind (always empty in current flows)
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub description: String,

    /// Local or remote photo URI, or empty
    #[serde(default)]
    pub photo: String,
}

impl Item {
    /// Build a stored record from a submitted item and its assigned id
    pub fn from_new(item: NewItem, id: u64) -> Self {
        Self {
            id: Some(id),
            name: item.name,
            purchase_price: item.purchase_price,
            kind: item.kind,
            description: item.description,
            photo: item.photo,
        }
    }

    /// True if a photo URI is attached
    pub fn has_photo(&self) -> bool {
        !self.photo.is_empty()
    }
}

/// An item as submitted by the add form, before an id is assigned
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub purchase_price: f64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photo: String,
}

impl NewItem {
    /// Create a new item with an empty kind, description and photo
    pub fn new(name: impl Into<String>, purchase_price: f64) -> Self {
        Self {
            name: name.into(),
            purchase_price,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = photo.into();
        self
    }
}
