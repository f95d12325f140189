//! Wide multiply-then-divide.
//!
//! Reserves at 18 decimals reach `1e23` and beyond, so `reserve * reserve`
//! overflows `u128`.  These helpers widen to 256 bits for the product and
//! narrow back after the division.

use crate::domain::Rounding;
use crate::error::AmmError;

#[allow(clippy::manual_div_ceil, clippy::assign_op_pattern)]
mod wide {
    uint::construct_uint! {
        /// 256-bit unsigned integer for intermediate products.
        pub struct U256(4);
    }
}

pub use wide::U256;

/// `a * b / denominator` with a 256-bit intermediate.
///
/// ```
/// use twinpool::domain::Rounding;
/// use twinpool::math::mul_div;
///
/// let big = 10u128.pow(30);
/// assert_eq!(mul_div(big, big, big, Rounding::Down), Ok(big));
/// assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
/// ```
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128, AmmError> {
    if denominator == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let product = U256::from(a) * U256::from(b);
    let (quotient, remainder) = product.div_mod(U256::from(denominator));
    let quotient = if rounding.is_up() && !remainder.is_zero() {
        quotient + U256::one()
    } else {
        quotient
    };
    narrow(quotient)
}

/// `a * b` as a 256-bit value.  Cannot overflow.
#[must_use]
pub fn wide_product(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Converts a 256-bit value back to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if `value` exceeds `u128::MAX`.
pub fn narrow(value: U256) -> Result<u128, AmmError> {
    if value > U256::from(u128::MAX) {
        return Err(AmmError::Overflow("256-bit intermediate exceeds u128"));
    }
    Ok(value.as_u128())
}
