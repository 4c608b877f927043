//! Account ledger state
//!
//! Owns the depositor -> account map and the cached aggregates. Every
//! balance-affecting operation settles accrued interest before mutating
//! principal. All fallible computation happens before any field is
//! assigned, so a failed operation leaves the ledger untouched.

use crate::account::Account;
use crate::accrual::AccrualEngine;
use crate::error::BankError;
use custodian_core::{AccountId, Amount, AmountError};
use std::collections::HashMap;
use tracing::debug;

/// How a withdrawal payout is sourced.
///
/// Principal-first attribution: the contributed baseline is paid from
/// custody, and only the part above it is interest, debited from the
/// reward pool. Summed over an account's lifetime this routes every token
/// of paid-out interest through the pool and never through custody funds
/// held for other depositors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    /// Paid from custody (the depositor's own capital coming back)
    pub principal_portion: Amount,
    /// Paid from the reward pool (accrued interest being realized)
    pub interest_portion: Amount,
}

/// In-memory ledger: identity -> account, plus cached aggregates.
#[derive(Debug, Default)]
pub struct LedgerState {
    accounts: HashMap<AccountId, Account>,
    /// Cached sum of every account's `principal`. Must always equal the
    /// true sum; `verify_total` recomputes it for invariant checks.
    total_principal: Amount,
    /// Tokens physically held in custody: deposits received minus
    /// principal paid back out. Interest payouts never touch it.
    underlying_balance: Amount,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an account
    pub fn account(&self, who: &AccountId) -> Option<&Account> {
        self.accounts.get(who)
    }

    /// Cached sum of all settled principal
    pub fn total_principal(&self) -> Amount {
        self.total_principal
    }

    /// Tokens held in custody (principal-equivalent only)
    pub fn underlying_balance(&self) -> Amount {
        self.underlying_balance
    }

    /// Settled balance plus previewed interest as of `now`, without
    /// mutating. Unknown identities read as zero.
    pub fn projected_balance(
        &self,
        engine: &AccrualEngine,
        who: &AccountId,
        now: u64,
    ) -> Result<Amount, BankError> {
        match self.accounts.get(who) {
            Some(account) => {
                let interest = engine.preview(account, now)?;
                account
                    .principal
                    .checked_add(&interest)
                    .ok_or_else(|| AmountError::Overflow.into())
            }
            None => Ok(Amount::ZERO),
        }
    }

    /// Compute the payout decomposition a withdrawal would commit, without
    /// mutating. The caller checks the reward pool against
    /// `interest_portion` before applying.
    pub fn plan_withdraw(
        &self,
        engine: &AccrualEngine,
        who: &AccountId,
        amount: Amount,
        now: u64,
    ) -> Result<Withdrawal, BankError> {
        let account = self
            .accounts
            .get(who)
            .ok_or(BankError::InsufficientBalance {
                requested: amount,
                available: Amount::ZERO,
            })?;
        let interest = engine.preview(account, now)?;
        let settled = account
            .principal
            .checked_add(&interest)
            .ok_or(AmountError::Overflow)?;
        if amount > settled {
            return Err(BankError::InsufficientBalance {
                requested: amount,
                available: settled,
            });
        }
        let principal_portion = amount.min(account.contributed);
        let interest_portion = amount
            .checked_sub(&principal_portion)
            .ok_or(AmountError::Overflow)?;
        Ok(Withdrawal {
            principal_portion,
            interest_portion,
        })
    }

    /// Settle and credit a deposit. Creates the account on first deposit.
    /// Returns the interest settled in passing.
    pub fn apply_deposit(
        &mut self,
        engine: &AccrualEngine,
        who: &AccountId,
        amount: Amount,
        now: u64,
    ) -> Result<Amount, BankError> {
        let interest = match self.accounts.get(who) {
            Some(account) => engine.preview(account, now)?,
            None => Amount::ZERO,
        };
        let credited = amount.checked_add(&interest).ok_or(AmountError::Overflow)?;
        let new_total = self
            .total_principal
            .checked_add(&credited)
            .ok_or(AmountError::Overflow)?;
        let new_underlying = self
            .underlying_balance
            .checked_add(&amount)
            .ok_or(AmountError::Overflow)?;

        let account = self
            .accounts
            .entry(who.clone())
            .or_insert_with(|| Account::open(who.clone(), now));
        let new_principal = account
            .principal
            .checked_add(&credited)
            .ok_or(AmountError::Overflow)?;
        let new_contributed = account
            .contributed
            .checked_add(&amount)
            .ok_or(AmountError::Overflow)?;

        account.principal = new_principal;
        account.contributed = new_contributed;
        account.last_settled = now;
        // Deposits do not reset the cooldown anchor; only account creation
        // and withdrawals do.
        self.total_principal = new_total;
        self.underlying_balance = new_underlying;

        debug!(%who, %amount, %interest, "deposit applied");
        Ok(interest)
    }

    /// Settle and debit a withdrawal, recording the payout decomposition.
    /// Resets the cooldown anchor to `now`.
    pub fn apply_withdraw(
        &mut self,
        engine: &AccrualEngine,
        who: &AccountId,
        amount: Amount,
        now: u64,
    ) -> Result<Withdrawal, BankError> {
        let withdrawal = self.plan_withdraw(engine, who, amount, now)?;

        // plan_withdraw guarantees the account exists and covers `amount`
        let account = self
            .accounts
            .get_mut(who)
            .ok_or(BankError::InsufficientBalance {
                requested: amount,
                available: Amount::ZERO,
            })?;
        let interest = engine.settle(account, now)?;
        account.principal = account
            .principal
            .checked_sub(&amount)
            .ok_or(AmountError::Overflow)?;
        account.contributed = account
            .contributed
            .checked_sub(&withdrawal.principal_portion)
            .ok_or(AmountError::Overflow)?;
        account.cooldown_anchor = now;

        self.total_principal = self
            .total_principal
            .checked_add(&interest)
            .and_then(|t| t.checked_sub(&amount))
            .ok_or(AmountError::Overflow)?;
        self.underlying_balance = self
            .underlying_balance
            .checked_sub(&withdrawal.principal_portion)
            .ok_or(AmountError::Overflow)?;

        debug!(%who, %amount, interest_portion = %withdrawal.interest_portion, "withdrawal applied");
        Ok(withdrawal)
    }

    /// Recompute the principal sum and compare against the cache.
    /// For invariant checks in tests and audits.
    pub fn verify_total(&self) -> bool {
        let mut sum = Amount::ZERO;
        for account in self.accounts.values() {
            match sum.checked_add(&account.principal) {
                Some(s) => sum = s,
                None => return false,
            }
        }
        sum == self.total_principal
    }
}
