//! Amount - Non-negative fixed-scale decimal for token quantities
//!
//! All token quantities in Custodian MUST be non-negative and carry at most
//! `SCALE` fractional digits. This is enforced at the type level. Arithmetic
//! is exact scaled-integer decimal arithmetic; interest products are
//! truncated toward zero so accrual can never round value into existence.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum number of fractional digits an `Amount` may carry.
///
/// Matches the 18-decimal token units the custodial contract operates in.
pub const SCALE: u32 = 18;

/// Errors that can occur when working with amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    #[error("Amount {0} exceeds {SCALE} fractional digits")]
    ExcessPrecision(Decimal),

    #[error("Amount arithmetic overflowed")]
    Overflow,
}

/// A non-negative decimal token quantity with at most [`SCALE`] fractional digits.
///
/// # Invariant
/// The inner value is always >= 0 and has scale <= [`SCALE`]. Both are
/// enforced by the constructor.
///
/// # Example
/// ```
/// use custodian_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::new(Decimal::new(100, 0)).unwrap();
/// assert_eq!(amount.value(), Decimal::new(100, 0));
///
/// // Negative amounts are rejected
/// let negative = Amount::new(Decimal::new(-100, 0));
/// assert!(negative.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Zero amount constant
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new Amount from a Decimal.
    ///
    /// Returns an error if the value is negative or carries more than
    /// [`SCALE`] fractional digits.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            Err(AmountError::NegativeAmount(value))
        } else if value.scale() > SCALE && value.normalize().scale() > SCALE {
            Err(AmountError::ExcessPrecision(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Create an Amount without validation.
    ///
    /// # Safety
    /// The caller MUST ensure the value is non-negative with scale <= SCALE.
    /// Use only for trusted sources (e.g., values already truncated here).
    #[inline]
    pub const fn new_unchecked(value: Decimal) -> Self {
        Self(value)
    }

    /// Get the inner Decimal value
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition - returns None on mantissa overflow
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction - returns None if the result would be negative
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        let result = self.0.checked_sub(other.0)?;
        if result < Decimal::ZERO {
            None
        } else {
            Some(Amount(result))
        }
    }

    /// Multiply by a non-negative factor, truncating the product to
    /// [`SCALE`] fractional digits.
    ///
    /// Truncation always rounds toward zero. The accrual engine relies on
    /// this direction: interest owed is floored, never rounded up.
    pub fn mul_truncated(&self, factor: Decimal) -> Result<Amount, AmountError> {
        if factor < Decimal::ZERO {
            return Err(AmountError::NegativeAmount(factor));
        }
        let product = self.0.checked_mul(factor).ok_or(AmountError::Overflow)?;
        Ok(Amount(
            product.round_dp_with_strategy(SCALE, RoundingStrategy::ToZero),
        ))
    }

    /// The smaller of two amounts
    pub fn min(&self, other: &Amount) -> Amount {
        if self.0 <= other.0 {
            *self
        } else {
            *other
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}
