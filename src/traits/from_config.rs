//! Construction from a validated configuration.

use crate::error::AmmError;

/// Builds a value from its configuration type.
///
/// Implementations validate the whole configuration before returning, so a
/// successfully constructed value always starts in a consistent state.
pub trait FromConfig<C>: Sized {
    /// Creates `Self` from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] or a more specific
    /// variant if `config` is not usable.
    fn from_config(config: &C) -> Result<Self, AmmError>;
}
