//! BankManager - the public operation surface
//!
//! Serializes every operation behind a single critical section covering the
//! ledger and the reward pool, so no operation can act on a stale principal
//! or pool balance. The pipeline per operation is validate -> (custody
//! transfer) -> apply -> publish; rejections happen before anything moves.

use crate::clock::Clock;
use crate::custody::AssetCustody;
use custodian_bus::{BankEvent, EventBus};
use custodian_core::{AccountId, Amount};
use custodian_ledger::{
    AccrualEngine, BankConfig, BankError, LedgerState, PolicyEnforcer, RewardPool,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use tracing::{error, info};

struct Inner {
    ledger: LedgerState,
    pool: RewardPool,
}

/// Composition root: policy + accrual + ledger + reward pool behind the
/// deposit/withdraw/fund operations.
pub struct BankManager {
    policy: PolicyEnforcer,
    accrual: AccrualEngine,
    admin: AccountId,
    clock: Arc<dyn Clock>,
    custody: Arc<dyn AssetCustody>,
    bus: EventBus,
    inner: Mutex<Inner>,
}

impl BankManager {
    /// Build the engine from its immutable configuration and collaborators.
    pub fn new(config: BankConfig, clock: Arc<dyn Clock>, custody: Arc<dyn AssetCustody>) -> Self {
        Self {
            policy: PolicyEnforcer::new(&config),
            accrual: AccrualEngine::with_rate(config.rate_per_second),
            admin: config.admin.clone(),
            clock,
            custody,
            bus: EventBus::new(),
            inner: Mutex::new(Inner {
                ledger: LedgerState::new(),
                pool: RewardPool::new(config.admin),
            }),
        }
    }

    /// Subscribe to Deposited/Withdrawn/RewardsFunded events
    pub fn subscribe(&self) -> broadcast::Receiver<BankEvent> {
        self.bus.subscribe()
    }

    /// Credit a deposit to `who`, creating the account on first use.
    pub fn deposit(&self, who: &AccountId, amount: Amount) -> Result<(), BankError> {
        self.policy.check_deposit(amount)?;

        let mut inner = self.lock();
        let now = self.clock.now();
        // Surfaces ClockRegression before any token moves
        inner
            .ledger
            .projected_balance(&self.accrual, who, now)
            .map_err(surface_fatal)?;

        self.custody.transfer_in(who, amount)?;
        let interest = inner.ledger.apply_deposit(&self.accrual, who, amount, now)?;

        info!(%who, %amount, %interest, "deposit committed");
        self.bus.publish(BankEvent::deposited(who.clone(), amount));
        Ok(())
    }

    /// Pay `amount` out to `who`: settles interest, enforces the cooldown
    /// and per-tx ceiling, and sources the interest portion from the reward
    /// pool. Fails atomically - if the pool cannot cover the interest, no
    /// balance moves at all.
    pub fn withdraw(&self, who: &AccountId, amount: Amount) -> Result<(), BankError> {
        let mut inner = self.lock();
        let now = self.clock.now();

        let settled = inner
            .ledger
            .projected_balance(&self.accrual, who, now)
            .map_err(surface_fatal)?;
        let account = inner
            .ledger
            .account(who)
            .ok_or(BankError::InsufficientBalance {
                requested: amount,
                available: Amount::ZERO,
            })?;
        self.policy.check_withdraw(account, amount, settled, now)?;

        let plan = inner.ledger.plan_withdraw(&self.accrual, who, amount, now)?;
        inner.pool.ensure_can_pay(plan.interest_portion)?;

        self.custody.transfer_out(who, amount)?;
        inner.ledger.apply_withdraw(&self.accrual, who, amount, now)?;
        inner.pool.pay_interest(plan.interest_portion)?;

        info!(
            %who, %amount,
            interest_portion = %plan.interest_portion,
            "withdrawal committed"
        );
        self.bus.publish(BankEvent::withdrawn(who.clone(), amount));
        Ok(())
    }

    /// Fund the reward pool. Administrator only.
    pub fn fund_rewards(&self, caller: &AccountId, amount: Amount) -> Result<(), BankError> {
        if *caller != self.admin {
            return Err(BankError::Unauthorized {
                caller: caller.clone(),
            });
        }
        if amount.is_zero() {
            return Err(BankError::InvalidAmount);
        }

        let mut inner = self.lock();
        self.custody.transfer_in(caller, amount)?;
        inner.pool.fund(caller, amount)?;

        info!(%amount, "reward pool funded");
        self.bus.publish(BankEvent::rewards_funded(amount));
        Ok(())
    }

    /// Live balance including accrued-but-unsettled interest. Read-only:
    /// the settlement is projected, never committed.
    pub fn balance_of(&self, who: &AccountId) -> Result<Amount, BankError> {
        let inner = self.lock();
        let now = self.clock.now();
        inner
            .ledger
            .projected_balance(&self.accrual, who, now)
            .map_err(surface_fatal)
    }

    /// Sum of all settled principal (equals custody holdings plus settled
    /// interest owed; consistent whenever no operation is in flight).
    pub fn total_assets(&self) -> Amount {
        self.lock().ledger.total_principal()
    }

    /// Current reward pool balance, for solvency monitoring
    pub fn reward_balance(&self) -> Amount {
        self.lock().pool.funded()
    }

    /// Recompute the principal sum against the cached total (audit hook)
    pub fn verify_total(&self) -> bool {
        self.lock().ledger.verify_total()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("bank state lock poisoned")
    }
}

/// A clock regression means the time source is broken; log loudly before
/// propagating so operators treat it as an invariant violation, not a
/// user-facing rejection.
fn surface_fatal(err: BankError) -> BankError {
    if let BankError::ClockRegression { last_settled, now } = &err {
        error!(
            last_settled = *last_settled,
            now = *now,
            "clock regression - time source is broken"
        );
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::custody::InMemoryCustody;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn amount(v: Decimal) -> Amount {
        Amount::new(v).unwrap()
    }

    fn setup() -> (Arc<ManualClock>, Arc<InMemoryCustody>, BankManager) {
        let config = BankConfig {
            rate_per_second: dec!(0.0001),
            max_deposit_per_tx: amount(dec!(1000)),
            max_withdraw_per_tx: amount(dec!(600)),
            cooldown_secs: 100,
            admin: AccountId::new("owner"),
        };
        let clock = Arc::new(ManualClock::new(0));
        let custody = Arc::new(InMemoryCustody::new());
        let bank = BankManager::new(config, clock.clone(), custody.clone());
        (clock, custody, bank)
    }

    #[test]
    fn test_balance_of_unknown_is_zero() {
        let (_, _, bank) = setup();
        assert!(bank.balance_of(&AccountId::new("nobody")).unwrap().is_zero());
    }

    #[test]
    fn test_clock_regression_is_fatal_not_applied() {
        let (clock, custody, bank) = setup();
        let alice = AccountId::new("alice");
        custody.mint(&alice, amount(dec!(1000)));

        clock.set(100);
        bank.deposit(&alice, amount(dec!(500))).unwrap();

        clock.set(50);
        let err = bank.deposit(&alice, amount(dec!(100))).unwrap_err();
        assert!(matches!(err, BankError::ClockRegression { .. }));

        // No tokens moved on the failed call
        assert_eq!(custody.balance_of(&alice), amount(dec!(500)));
        assert_eq!(bank.total_assets(), amount(dec!(500)));
    }

    #[test]
    fn test_custody_failure_aborts_before_ledger() {
        let (_, _, bank) = setup();
        let alice = AccountId::new("alice");

        // Alice holds no external tokens, so transfer_in fails
        let err = bank.deposit(&alice, amount(dec!(100))).unwrap_err();
        assert!(matches!(err, BankError::CustodyFailure(_)));
        assert!(bank.balance_of(&alice).unwrap().is_zero());
        assert!(bank.total_assets().is_zero());
    }

    #[test]
    fn test_fund_rewards_requires_admin() {
        let (_, custody, bank) = setup();
        let alice = AccountId::new("alice");
        custody.mint(&alice, amount(dec!(100)));

        let err = bank.fund_rewards(&alice, amount(dec!(100))).unwrap_err();
        assert!(matches!(err, BankError::Unauthorized { .. }));
        assert!(bank.reward_balance().is_zero());
    }
}
