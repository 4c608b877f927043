//! Event subscriber trait for async event handling

use crate::error::BusError;
use crate::event::BankEvent;
use async_trait::async_trait;

/// Trait for event subscribers
///
/// Subscribers receive events from the event bus and process them
/// asynchronously. Each subscriber should be idempotent (handle duplicate
/// events gracefully).
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    /// Get the subscriber name (for logging)
    fn name(&self) -> &str;

    /// Handle a bank event
    ///
    /// Called for each event published to the bus.
    async fn handle(&self, event: &BankEvent) -> Result<(), BusError>;
}
