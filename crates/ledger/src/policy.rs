//! Policy enforcement - validate-then-apply
//!
//! Every check here runs strictly before any state mutation. A rejected
//! operation leaves the ledger exactly as it was.

use crate::account::Account;
use crate::config::BankConfig;
use crate::error::{BankError, LimitKind};
use custodian_core::Amount;

/// Validates requested operations against the configured limits.
#[derive(Debug, Clone)]
pub struct PolicyEnforcer {
    max_deposit_per_tx: Amount,
    max_withdraw_per_tx: Amount,
    cooldown_secs: u64,
}

impl PolicyEnforcer {
    pub fn new(config: &BankConfig) -> Self {
        Self {
            max_deposit_per_tx: config.max_deposit_per_tx,
            max_withdraw_per_tx: config.max_withdraw_per_tx,
            cooldown_secs: config.cooldown_secs,
        }
    }

    /// Validate a deposit request.
    pub fn check_deposit(&self, amount: Amount) -> Result<(), BankError> {
        if amount.is_zero() {
            return Err(BankError::InvalidAmount);
        }
        if amount > self.max_deposit_per_tx {
            return Err(BankError::LimitExceeded {
                kind: LimitKind::Deposit,
                requested: amount,
                limit: self.max_deposit_per_tx,
            });
        }
        Ok(())
    }

    /// Validate a withdrawal request against the account's cooldown anchor
    /// and its settled principal (principal plus previewed interest).
    pub fn check_withdraw(
        &self,
        account: &Account,
        amount: Amount,
        settled_principal: Amount,
        now: u64,
    ) -> Result<(), BankError> {
        if amount.is_zero() {
            return Err(BankError::InvalidAmount);
        }
        let since_anchor = now.saturating_sub(account.cooldown_anchor);
        if since_anchor < self.cooldown_secs {
            return Err(BankError::CooldownActive {
                remaining_secs: self.cooldown_secs - since_anchor,
            });
        }
        if amount > self.max_withdraw_per_tx {
            return Err(BankError::LimitExceeded {
                kind: LimitKind::Withdraw,
                requested: amount,
                limit: self.max_withdraw_per_tx,
            });
        }
        if amount > settled_principal {
            return Err(BankError::InsufficientBalance {
                requested: amount,
                available: settled_principal,
            });
        }
        Ok(())
    }
}
