//! Stage change notifications
//!
//! Published on a broadcast channel after each committed state change so that
//! presentation layers can re-render without polling.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::domain::Stage;

/// Buffered events per subscriber before the oldest are dropped
pub const EVENT_CAPACITY: usize = 64;

/// A committed stage change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageEvent {
    /// Epoch the change was committed in
    pub epoch: u64,
    pub from: Stage,
    pub to: Stage,
}

/// Broadcast channel for stage events
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StageEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StageEvent> {
        self.tx.subscribe()
    }

    /// Publish an event; having no subscribers is fine
    pub fn publish(&self, event: StageEvent) {
        let _ = self.tx.send(event);
    }
}
