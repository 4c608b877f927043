//! Per-depositor account state
//!
//! Accounts are created implicitly on first deposit and never destroyed;
//! a zero-balance account persists as a valid, inert entry.

use custodian_core::{AccountId, Amount};
use serde::{Deserialize, Serialize};

/// State for one depositor.
///
/// # Invariants
/// - `principal >= 0` and `contributed >= 0` (by the `Amount` type)
/// - `contributed <= principal` after settlement: principal is contributed
///   capital plus settled interest
/// - `last_settled <= now` for any `now` the engine is driven with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable depositor identity
    pub owner: AccountId,

    /// Settled balance: contributed capital plus interest folded in so far
    pub principal: Amount,

    /// Net contributed capital (deposits minus principal paid back out).
    /// The interest-attribution baseline: anything above it is pool-funded.
    pub contributed: Amount,

    /// Timestamp of the last accrual settlement (seconds)
    pub last_settled: u64,

    /// Cooldown reference point: set at account creation and at every
    /// withdrawal. A fresh depositor waits out the full cooldown before
    /// the first withdrawal.
    pub cooldown_anchor: u64,
}

impl Account {
    /// Open an empty account as of `now`.
    pub fn open(owner: AccountId, now: u64) -> Self {
        Self {
            owner,
            principal: Amount::ZERO,
            contributed: Amount::ZERO,
            last_settled: now,
            cooldown_anchor: now,
        }
    }

    /// Settled-but-unwithdrawn interest: the part of principal above the
    /// contributed baseline. This is what the reward pool still owes for.
    pub fn settled_interest(&self) -> Amount {
        // contributed <= principal by construction
        self.principal
            .checked_sub(&self.contributed)
            .unwrap_or(Amount::ZERO)
    }
}
