//! Token decimal places.

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

const MAX_DECIMALS: u8 = 18;

/// Number of fractional digits a token uses, in `0..=18`.
///
/// # Examples
///
/// ```
/// use twinpool::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.scale_up(2), 2_000_000);
/// assert!(Decimals::new(19).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Decimals {
    /// No fractional digits.
    pub const ZERO: Self = Self(0);

    /// Eighteen fractional digits, the widest supported precision and the
    /// precision of [`Shares`](super::Shares).
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Validates and wraps a decimal count.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, AmmError> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// `10^decimals`.
    #[must_use]
    pub const fn factor(&self) -> u128 {
        10u128.pow(self.0 as u32)
    }

    /// Whole units to raw units.  Cannot overflow: `u64::MAX * 10^18`
    /// fits in `u128`.
    #[must_use]
    pub const fn scale_up(&self, whole: u64) -> u128 {
        (whole as u128) * self.factor()
    }

    /// Rescales a raw amount at this precision to 18 decimals.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the rescaled value does not fit.
    pub const fn normalize(&self, raw: u128) -> Result<u128, AmmError> {
        let gap = 10u128.pow((MAX_DECIMALS - self.0) as u32);
        match raw.checked_mul(gap) {
            Some(v) => Ok(v),
            None => Err(AmmError::Overflow("normalized amount exceeds u128")),
        }
    }
}

impl TryFrom<u8> for Decimals {
    type Error = AmmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}
