//! Ledger errors
//!
//! All non-fatal kinds reject the operation synchronously with no state
//! mutation. `ClockRegression` is the exception: it signals a broken time
//! source and must be treated as fatal by the caller, not retried.

use custodian_core::{AccountId, Amount, AmountError};
use thiserror::Error;

/// Which per-transaction ceiling was exceeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Deposit,
    Withdraw,
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitKind::Deposit => write!(f, "deposit"),
            LimitKind::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// Errors that can occur in bank operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Max {kind} per tx exceeded: {requested} > {limit}")]
    LimitExceeded {
        kind: LimitKind,
        requested: Amount,
        limit: Amount,
    },

    #[error("Withdrawal cooldown active: {remaining_secs}s remaining")]
    CooldownActive { remaining_secs: u64 },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Amount,
        available: Amount,
    },

    #[error("Reward pool cannot cover interest: required {required}, funded {funded}")]
    InsufficientRewardFunds { required: Amount, funded: Amount },

    #[error("Unauthorized: {caller} is not the administrator")]
    Unauthorized { caller: AccountId },

    #[error("Clock regression: now {now} is before last settlement {last_settled}")]
    ClockRegression { last_settled: u64, now: u64 },

    #[error("Custody transfer failed: {0}")]
    CustodyFailure(String),

    #[error(transparent)]
    Amount(#[from] AmountError),
}
