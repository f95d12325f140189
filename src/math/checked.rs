//! `Result`-returning arithmetic for quantity newtypes.
//!
//! The inherent `checked_*` methods on [`Amount`] and [`Shares`] return
//! `Option`; this trait lifts them into [`AmmError`] so engine code can
//! use `?` and still report which operation went out of range.

use crate::domain::{Amount, Shares};
use crate::error::AmmError;

/// Fallible arithmetic that names its failure.
///
/// ```
/// use twinpool::domain::Amount;
/// use twinpool::math::CheckedArithmetic;
///
/// assert_eq!(Amount::new(2).safe_add(&Amount::new(3)), Ok(Amount::new(5)));
/// assert!(Amount::new(2).safe_sub(&Amount::new(3)).is_err());
/// ```
pub trait CheckedArithmetic: Sized {
    /// Addition.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] past the type's maximum.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Subtraction.
    ///
    /// # Errors
    ///
    /// [`AmmError::Underflow`] below zero.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Shares {
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("share addition overflow"))
    }

    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("share subtraction underflow"))
    }
}
