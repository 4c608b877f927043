//! Bank events for pub/sub distribution

use chrono::{DateTime, Utc};
use custodian_core::{AccountId, Amount};
use serde::{Deserialize, Serialize};

/// Events emitted by the bank engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BankEvent {
    /// A deposit was credited
    Deposited {
        who: AccountId,
        amount: Amount,
        /// When the event was published
        timestamp: DateTime<Utc>,
    },

    /// A withdrawal was paid out
    Withdrawn {
        who: AccountId,
        amount: Amount,
        timestamp: DateTime<Utc>,
    },

    /// The administrator funded the reward pool
    RewardsFunded {
        amount: Amount,
        timestamp: DateTime<Utc>,
    },
}

impl BankEvent {
    /// Create a Deposited event stamped now
    pub fn deposited(who: AccountId, amount: Amount) -> Self {
        Self::Deposited {
            who,
            amount,
            timestamp: Utc::now(),
        }
    }

    /// Create a Withdrawn event stamped now
    pub fn withdrawn(who: AccountId, amount: Amount) -> Self {
        Self::Withdrawn {
            who,
            amount,
            timestamp: Utc::now(),
        }
    }

    /// Create a RewardsFunded event stamped now
    pub fn rewards_funded(amount: Amount) -> Self {
        Self::RewardsFunded {
            amount,
            timestamp: Utc::now(),
        }
    }
}
