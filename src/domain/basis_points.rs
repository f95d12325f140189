//! Percentages expressed in basis points.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::AmmError;

/// Basis points in one whole (100 %).
pub(crate) const BPS_DENOMINATOR: u32 = 10_000;

/// A percentage in basis points: 1 bp = 0.01 %, 10 000 bp = 100 %.
///
/// Any `u16` is representable; [`is_valid_percent`](Self::is_valid_percent)
/// tells whether the value is a meaningful percentage.
///
/// # Examples
///
/// ```
/// use twinpool::domain::{Amount, BasisPoints, Rounding};
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.apply(Amount::new(10_000), Rounding::Up), Ok(Amount::new(30)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// 0 %.
    pub const ZERO: Self = Self(0);

    /// 100 %.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR as u16);

    /// Wraps a raw basis-point value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Returns `true` for values in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 as u32 <= BPS_DENOMINATOR
    }

    /// Computes `amount * self / 10_000` with the given rounding.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if `amount * self` does not fit in
    /// `u128`.
    pub const fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        let product = match amount.get().checked_mul(self.0 as u128) {
            Some(v) => v,
            None => return Err(AmmError::Overflow("basis points apply overflow")),
        };
        match crate::math::div_round(product, BPS_DENOMINATOR as u128, rounding) {
            Some(v) => Ok(Amount::new(v)),
            None => Err(AmmError::DivisionByZero),
        }
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
