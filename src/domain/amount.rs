//! Raw token amount with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Rounding;
use crate::error::AmmError;
use crate::math::mul_div;

/// A token quantity in the token's smallest unit.
///
/// `Amount` never interprets decimals; [`Token`](super::Token) does that.
/// Arithmetic is checked and returns `None` instead of wrapping or
/// panicking.
///
/// # Examples
///
/// ```
/// use twinpool::domain::{Amount, Rounding};
///
/// let a = Amount::new(100);
/// assert_eq!(a.checked_add(&Amount::new(5)), Some(Amount::new(105)));
/// assert_eq!(a.mul_div(1, 3, Rounding::Up), Ok(Amount::new(34)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw `u128`.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` for the zero amount.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Computes `self * numerator / denominator` with a 256-bit
    /// intermediate, so the product may exceed `u128` as long as the
    /// quotient fits.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `denominator` is zero.
    /// - [`AmmError::Overflow`] if the quotient does not fit in `u128`.
    pub fn mul_div(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, AmmError> {
        mul_div(self.0, numerator, denominator, rounding).map(Self)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
