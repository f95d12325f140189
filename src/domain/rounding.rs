//! Explicit rounding direction for integer division.

/// Direction in which a division result is rounded.
///
/// Every division in the engine names its direction.  The convention is
/// to round in the pool's favour: amounts paid out round [`Down`], amounts
/// the pool must keep (fees, post-trade reserves) round [`Up`].
///
/// [`Down`]: Rounding::Down
/// [`Up`]: Rounding::Up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
