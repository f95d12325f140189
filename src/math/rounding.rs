//! Integer division with a named rounding direction.
//!
//! The engine rounds in the pool's favour everywhere:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | amount paid to a user | [`Rounding::Down`] |
//! | shares minted | [`Rounding::Down`] |
//! | fee withheld | [`Rounding::Up`] |
//! | post-trade reserve kept | [`Rounding::Up`] |

use crate::domain::Rounding;

/// `numerator / denominator`, rounded as requested.
///
/// Returns `None` when `denominator` is zero.  Never overflows.
///
/// ```
/// use twinpool::domain::Rounding;
/// use twinpool::math::div_round;
///
/// assert_eq!(div_round(7, 2, Rounding::Down), Some(3));
/// assert_eq!(div_round(7, 2, Rounding::Up), Some(4));
/// assert_eq!(div_round(7, 0, Rounding::Up), None);
/// ```
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let quotient = numerator / denominator;
    // quotient + 1 cannot overflow: a non-zero remainder implies denominator > 1.
    if rounding.is_up() && numerator % denominator != 0 {
        Some(quotient + 1)
    } else {
        Some(quotient)
    }
}
