//! Event bus for valuables using tokio::broadcast
//!
//! The repository publishes after every successful write so list views can
//! refresh without polling.

use tokio::sync::broadcast;

/// Events emitted by the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEvent {
    /// A new item was stored
    ItemInserted(String),
    /// Records with this name were removed
    ItemsDeleted { name: String, removed: usize },
    /// The whole list was removed
    Cleared,
}

/// Events kept per receiver before slow subscribers start lagging
pub const DEFAULT_CAPACITY: usize = 256;

/// Broadcast channel shared by the repository and anyone watching it
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<InventoryEvent>,
}

impl EventBus {
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Send to every current subscriber. Events with no listener are dropped.
    pub fn publish(&self, event: InventoryEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InventoryEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
