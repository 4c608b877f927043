//! Bank configuration
//!
//! Loaded once at construction and immutable for the lifetime of the engine.

use custodian_core::{AccountId, Amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Seconds in a 365-day year, the denominator the deployed contract used to
/// derive its per-second rate from an APR.
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 3600;

/// Immutable engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankConfig {
    /// Interest per unit principal per second (e.g. 12% APR / 31,536,000)
    pub rate_per_second: Decimal,

    /// Per-transaction deposit ceiling
    pub max_deposit_per_tx: Amount,

    /// Per-transaction withdrawal ceiling
    pub max_withdraw_per_tx: Amount,

    /// Minimum seconds between withdrawals (and before the first one)
    pub cooldown_secs: u64,

    /// The only identity allowed to fund the reward pool
    pub admin: AccountId,
}

impl BankConfig {
    /// Derive a per-second rate from an annual percentage rate.
    ///
    /// Division is exact decimal division to 28 digits; the accrual engine
    /// truncates final interest to the token scale, so any residual digits
    /// here can only under-pay, never over-pay.
    pub fn rate_from_apr(apr: Decimal) -> Decimal {
        apr / Decimal::from(SECONDS_PER_YEAR)
    }
}
