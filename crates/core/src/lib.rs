//! Custodian Core - Domain types
//!
//! This crate contains the fundamental types used across Custodian:
//! - `Amount`: Non-negative fixed-scale decimal for token quantities
//! - `AccountId`: Stable depositor identity

pub mod amount;
pub mod identity;

pub use amount::{Amount, AmountError, SCALE};
pub use identity::AccountId;
