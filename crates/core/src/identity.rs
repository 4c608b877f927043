//! AccountId - Stable depositor identity
//!
//! An address-equivalent identifier. Identity verification is the caller's
//! concern; the engine only requires that the id is stable and comparable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Case-normalized depositor identity.
///
/// Ids are uppercased on construction so `alice` and `ALICE` address the
/// same account, matching how the custody layer reports holders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Create a new AccountId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().to_uppercase())
    }

    /// The normalized id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}
