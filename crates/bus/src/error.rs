//! Bus errors

use thiserror::Error;

/// Errors that can occur in event distribution
#[derive(Error, Debug)]
pub enum BusError {
    #[error("Event channel closed")]
    ChannelClosed,

    #[error("Subscriber lagged, {skipped} events skipped")]
    Lagged { skipped: u64 },

    #[error("Subscriber '{name}' failed: {reason}")]
    SubscriberFailed { name: String, reason: String },
}
