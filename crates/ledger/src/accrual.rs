//! Interest Accrual Module
//!
//! Computes continuously accruing interest for custodial accounts.
//! Interest owed = principal * rate_per_second * elapsed, in exact decimal
//! arithmetic with truncating (floor) rounding. Truncation direction
//! matters: rounding up would promise value the reward pool does not hold.

use crate::account::Account;
use crate::error::BankError;
use custodian_core::{Amount, AmountError};
use rust_decimal::Decimal;

/// Interest accrual calculator
#[derive(Debug, Clone)]
pub struct AccrualEngine {
    /// Interest per unit principal per second
    rate_per_second: Decimal,
}

impl AccrualEngine {
    /// Create with a per-second rate
    pub fn with_rate(rate_per_second: Decimal) -> Self {
        Self { rate_per_second }
    }

    /// Get the per-second rate
    pub fn rate_per_second(&self) -> Decimal {
        self.rate_per_second
    }

    /// Interest owed on `principal` over `elapsed_secs`, truncated to the
    /// token scale.
    pub fn interest_for(&self, principal: Amount, elapsed_secs: u64) -> Result<Amount, BankError> {
        let factor = self
            .rate_per_second
            .checked_mul(Decimal::from(elapsed_secs))
            .ok_or(AmountError::Overflow)?;
        Ok(principal.mul_truncated(factor)?)
    }

    /// Interest that `settle` would fold in at `now`, without mutating.
    ///
    /// Used by balance queries and by validate-then-apply checks.
    pub fn preview(&self, account: &Account, now: u64) -> Result<Amount, BankError> {
        if now < account.last_settled {
            return Err(BankError::ClockRegression {
                last_settled: account.last_settled,
                now,
            });
        }
        self.interest_for(account.principal, now - account.last_settled)
    }

    /// Fold accrued interest into principal as of `now` and advance
    /// `last_settled`. Returns the interest folded in.
    ///
    /// Settlement moves no tokens; the reward pool is debited only when the
    /// interest is actually paid out on withdrawal. Settling twice at the
    /// same instant is idempotent (zero elapsed, zero interest).
    pub fn settle(&self, account: &mut Account, now: u64) -> Result<Amount, BankError> {
        let interest = self.preview(account, now)?;
        account.principal = account
            .principal
            .checked_add(&interest)
            .ok_or(AmountError::Overflow)?;
        account.last_settled = now;
        Ok(interest)
    }
}
