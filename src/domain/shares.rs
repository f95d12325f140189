//! Pool share units.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of fractional decimal places carried by [`Shares`].
pub const SHARE_DECIMALS: u8 = 18;

/// A provider's proportional claim on the pool reserves.
///
/// Kept distinct from [`Amount`](super::Amount) so that share counts and
/// token quantities cannot be mixed up by accident.  Shares carry
/// [`SHARE_DECIMALS`] fractional digits: `Shares::new(10u128.pow(18))` is
/// one whole share.
///
/// # Examples
///
/// ```
/// use twinpool::domain::Shares;
///
/// let a = Shares::from_whole(100);
/// let b = Shares::from_whole(50);
/// assert_eq!(a.checked_add(&b), Some(Shares::from_whole(150)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Raw units in one whole share.
    pub const ONE: Self = Self(10u128.pow(SHARE_DECIMALS as u32));

    /// Wraps a raw `u128` share count.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Builds a share count from whole shares.
    ///
    /// Saturates at `u128::MAX`, which is far beyond any reachable supply.
    #[must_use]
    pub const fn from_whole(whole: u64) -> Self {
        Self((whole as u128).saturating_mul(Self::ONE.0))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
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
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
