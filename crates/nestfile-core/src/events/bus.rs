//! In-process event bus for single-node deployments.

use tokio::sync::broadcast;

use super::DomainEvent;

/// Broadcast-based event bus.
///
/// Publishing never blocks; subscribers that fall behind the channel
/// capacity observe a lag error rather than stalling publishers.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    ///
    /// An event published while no subscriber is attached is dropped.
    pub fn publish(&self, event: DomainEvent) {
        let _ = self.tx.send(event);
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
