//! Swap fee charged by a pool.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, Rounding};

/// The fee a pool withholds from every swap input.
///
/// The fee is rounded up and stays in the input reserve, which is what
/// makes the reserve product grow with trading volume.  The default tier
/// charges nothing.
///
/// # Examples
///
/// ```
/// use twinpool::domain::{Amount, FeeTier};
///
/// let fee = FeeTier::TIER_0_30_PERCENT.fee_on(Amount::new(1_000)).expect("no overflow");
/// assert_eq!(fee, Amount::new(3));
/// assert_eq!(FeeTier::default(), FeeTier::ZERO);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee: the whole input enters the pricing curve.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.05 %, typical for correlated pairs.
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30 %, the usual volatile-pair fee.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00 %.
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a tier from arbitrary basis points.
    #[must_use]
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying basis points.
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns `true` if the tier charges nothing.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.get() == 0
    }

    /// Fee withheld from `amount_in`, rounded up.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) if
    /// the intermediate product overflows.
    pub const fn fee_on(&self, amount_in: Amount) -> crate::error::Result<Amount> {
        self.0.apply(amount_in, Rounding::Up)
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
