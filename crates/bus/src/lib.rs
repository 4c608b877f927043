//! Custodian Event Bus - In-process async event distribution
//!
//! Distributes committed bank events to subscribers (audit sinks, UI).
//!
//! - Sync `publish` from the engine's critical section
//! - Async pub/sub with tokio broadcast channel
//! - `EventSubscriber` trait for custom handlers

pub mod channel;
pub mod error;
pub mod event;
pub mod subscriber;

pub use channel::EventBus;
pub use error::BusError;
pub use event::BankEvent;
pub use subscriber::EventSubscriber;
