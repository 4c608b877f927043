//! Custodian Ledger - Interest-bearing account accounting core
//!
//! This is the HEART of Custodian. All balance-affecting state changes go
//! through this crate: accrual settlement, policy enforcement, principal
//! mutation, and reward-pool payouts.
//!
//! # Key Types
//! - `Account`: Per-depositor state (principal, baseline, timestamps)
//! - `LedgerState`: Identity -> Account map with cached aggregates
//! - `AccrualEngine`: Pure interest computation and settlement
//! - `PolicyEnforcer`: Validate-then-apply limit and cooldown checks
//! - `RewardPool`: Administrator-funded source of all interest payouts

pub mod account;
pub mod accrual;
pub mod config;
pub mod error;
pub mod policy;
pub mod rewards;
pub mod state;

pub use account::Account;
pub use accrual::AccrualEngine;
pub use config::BankConfig;
pub use error::{BankError, LimitKind};
pub use policy::PolicyEnforcer;
pub use rewards::RewardPool;
pub use state::{LedgerState, Withdrawal};
