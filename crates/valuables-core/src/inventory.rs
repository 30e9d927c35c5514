//! Inventory view data: running total and card rows

use crate::format::format_price;
use crate::validation::ValueLimits;
use serde::Serialize;
use valuables_types::Item;

/// Text shown when nothing has been stored yet
pub const EMPTY_MESSAGE: &str =
    "You currently do not have any valuables saved\nTap the plus icon to add a valuable";

/// Count and total value of the stored list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub count: usize,
    pub total_value: f64,
    pub ceiling: f64,
}

impl InventorySummary {
    pub fn from_items(items: &[Item], limits: ValueLimits) -> Self {
        Self {
            count: items.len(),
            total_value: items.iter().map(|item| item.purchase_price).sum(),
            ceiling: limits.ceiling,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Value that can still be added before reaching the ceiling
    pub fn remaining(&self) -> f64 {
        (self.ceiling - self.total_value).max(0.0)
    }
}

/// One tile of the inventory grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    /// Formatted price, e.g. `€1,250`
    pub amount: String,
    pub uri: String,
}

impl Card {
    pub fn from_item(item: &Item) -> Self {
        Self {
            title: item.name.clone(),
            amount: format!("€{}", format_price(item.purchase_price)),
            uri: item.photo.clone(),
        }
    }
}

/// Cards in display order (newest first, as stored)
pub fn cards(items: &[Item]) -> Vec<Card> {
    items.iter().map(Card::from_item).collect()
}
