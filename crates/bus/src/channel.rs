//! In-process event bus over a tokio broadcast channel
//!
//! The engine publishes synchronously from inside its critical section;
//! subscribers consume asynchronously. The bus retains nothing - an event
//! missed by a lagging subscriber is reported as `Lagged`, not replayed.

use crate::event::BankEvent;
use crate::subscriber::EventSubscriber;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Default broadcast capacity before slow subscribers start lagging
pub const DEFAULT_CAPACITY: usize = 256;

/// Event bus for distributing committed bank events
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BankEvent>,
}

impl EventBus {
    /// Create a bus with the given channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a bus with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Publish an event to all current subscribers.
    ///
    /// Publishing with no subscribers is not an error; the event is simply
    /// unobserved.
    pub fn publish(&self, event: BankEvent) {
        match self.sender.send(event) {
            Ok(receivers) => debug!(receivers, "event published"),
            Err(_) => debug!("event published with no subscribers"),
        }
    }

    /// Subscribe to events published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<BankEvent> {
        self.sender.subscribe()
    }

    /// Drive a subscriber until the channel closes.
    ///
    /// Handler errors are logged and skipped; a lagging subscriber is
    /// warned about and continues from the oldest retained event.
    pub async fn run_subscriber(&self, subscriber: Arc<dyn EventSubscriber>) {
        let mut receiver = self.subscribe();
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(err) = subscriber.handle(&event).await {
                        warn!(subscriber = subscriber.name(), %err, "subscriber failed");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        subscriber = subscriber.name(),
                        skipped, "subscriber lagged"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
