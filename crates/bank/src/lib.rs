//! Custodian Bank - composition root
//!
//! Wires the policy enforcer, accrual engine, account ledger, and reward
//! pool behind the public deposit/withdraw/fund operations, serialized
//! behind a single critical section, with events published to the bus.
//!
//! # Key Types
//! - `BankManager`: the public operation surface
//! - `Clock`: logical time source (`SystemClock`, `ManualClock`)
//! - `AssetCustody`: the token-moving collaborator (`InMemoryCustody`)

pub mod clock;
pub mod custody;
pub mod manager;

pub use clock::{Clock, ManualClock, SystemClock};
pub use custody::{AssetCustody, InMemoryCustody};
pub use manager::BankManager;
