//! Asset custody interface
//!
//! The collaborator that physically moves tokens. A custody failure must
//! abort the operation before any ledger state is mutated, so the manager
//! always calls custody before committing.

use custodian_core::{AccountId, Amount};
use custodian_ledger::BankError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Token-moving collaborator (the external asset contract).
pub trait AssetCustody: Send + Sync {
    /// Pull `amount` from `from` into the custody vault
    fn transfer_in(&self, from: &AccountId, amount: Amount) -> Result<(), BankError>;

    /// Pay `amount` out of the vault to `to`
    fn transfer_out(&self, to: &AccountId, amount: Amount) -> Result<(), BankError>;
}

#[derive(Debug, Default)]
struct CustodyBalances {
    holders: HashMap<AccountId, Amount>,
    vault: Amount,
}

/// In-memory custody double tracking external holder balances and the
/// vault, mirroring the mock token the engine is tested against.
#[derive(Debug, Default)]
pub struct InMemoryCustody {
    balances: Mutex<CustodyBalances>,
}

impl InMemoryCustody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a holder's external balance (test setup)
    pub fn mint(&self, who: &AccountId, amount: Amount) {
        let mut balances = self.balances.lock().expect("custody lock poisoned");
        let current = balances
            .holders
            .get(who)
            .copied()
            .unwrap_or(Amount::ZERO);
        let minted = current
            .checked_add(&amount)
            .expect("mint overflow in test setup");
        balances.holders.insert(who.clone(), minted);
    }

    /// A holder's external (non-custodied) balance
    pub fn balance_of(&self, who: &AccountId) -> Amount {
        let balances = self.balances.lock().expect("custody lock poisoned");
        balances.holders.get(who).copied().unwrap_or(Amount::ZERO)
    }

    /// Tokens currently held in the vault
    pub fn vault_balance(&self) -> Amount {
        self.balances.lock().expect("custody lock poisoned").vault
    }
}

impl AssetCustody for InMemoryCustody {
    fn transfer_in(&self, from: &AccountId, amount: Amount) -> Result<(), BankError> {
        let mut balances = self.balances.lock().expect("custody lock poisoned");
        let held = balances
            .holders
            .get(from)
            .copied()
            .unwrap_or(Amount::ZERO);
        let remaining = held.checked_sub(&amount).ok_or_else(|| {
            BankError::CustodyFailure(format!(
                "{from} holds {held}, cannot transfer in {amount}"
            ))
        })?;
        let vault = balances
            .vault
            .checked_add(&amount)
            .ok_or_else(|| BankError::CustodyFailure("vault overflow".to_string()))?;
        balances.holders.insert(from.clone(), remaining);
        balances.vault = vault;
        Ok(())
    }

    fn transfer_out(&self, to: &AccountId, amount: Amount) -> Result<(), BankError> {
        let mut balances = self.balances.lock().expect("custody lock poisoned");
        let vault = balances.vault.checked_sub(&amount).ok_or_else(|| {
            BankError::CustodyFailure(format!(
                "vault holds {}, cannot pay out {amount}",
                balances.vault
            ))
        })?;
        let held = balances.holders.get(to).copied().unwrap_or(Amount::ZERO);
        let credited = held
            .checked_add(&amount)
            .ok_or_else(|| BankError::CustodyFailure("holder overflow".to_string()))?;
        balances.vault = vault;
        balances.holders.insert(to.clone(), credited);
        Ok(())
    }
}
