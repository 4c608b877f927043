//! Reward pool - the exclusive source of interest payouts
//!
//! Funded only by the administrator, debited only when accrued interest is
//! actually paid out on a withdrawal. Depositors' principal never backs an
//! interest payment.

use crate::error::BankError;
use custodian_core::{AccountId, Amount, AmountError};
use serde::{Deserialize, Serialize};

/// Administrator-funded interest pool.
///
/// # Invariant
/// `funded >= 0` always (by the `Amount` type); a payout that would overdraw
/// the pool is rejected before any balance moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardPool {
    admin: AccountId,
    funded: Amount,
}

impl RewardPool {
    /// Create an empty pool owned by `admin`.
    pub fn new(admin: AccountId) -> Self {
        Self {
            admin,
            funded: Amount::ZERO,
        }
    }

    /// Current funded balance
    pub fn funded(&self) -> Amount {
        self.funded
    }

    /// Increase the pool. Only the administrator may fund.
    pub fn fund(&mut self, caller: &AccountId, amount: Amount) -> Result<(), BankError> {
        if *caller != self.admin {
            return Err(BankError::Unauthorized {
                caller: caller.clone(),
            });
        }
        if amount.is_zero() {
            return Err(BankError::InvalidAmount);
        }
        self.funded = self
            .funded
            .checked_add(&amount)
            .ok_or(AmountError::Overflow)?;
        Ok(())
    }

    /// Check that the pool can cover an interest payout of `amount`.
    pub fn ensure_can_pay(&self, amount: Amount) -> Result<(), BankError> {
        if amount > self.funded {
            return Err(BankError::InsufficientRewardFunds {
                required: amount,
                funded: self.funded,
            });
        }
        Ok(())
    }

    /// Debit an interest payout. Fails (without mutating) if the pool
    /// cannot cover it; the caller must then fail the whole withdrawal.
    pub fn pay_interest(&mut self, amount: Amount) -> Result<(), BankError> {
        self.funded = self.funded.checked_sub(&amount).ok_or_else(|| {
            BankError::InsufficientRewardFunds {
                required: amount,
                funded: self.funded,
            }
        })?;
        Ok(())
    }
}
