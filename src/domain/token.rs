//! A token as the pool sees it.

use serde::{Deserialize, Serialize};

use super::{Decimals, TokenAddress};

/// A token's ledger address together with its precision.
///
/// # Examples
///
/// ```
/// use twinpool::domain::{Decimals, Token, TokenAddress};
///
/// let usdc = Token::new(TokenAddress::from_bytes([1u8; 32]), Decimals::new(6).expect("valid"));
/// assert_eq!(usdc.to_raw_amount(3), 3_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    address: TokenAddress,
    decimals: Decimals,
}

impl Token {
    /// Creates a token descriptor.
    #[must_use]
    pub const fn new(address: TokenAddress, decimals: Decimals) -> Self {
        Self { address, decimals }
    }

    /// An 18-decimal token at `address`.
    #[must_use]
    pub const fn with_max_precision(address: TokenAddress) -> Self {
        Self::new(address, Decimals::MAX)
    }

    /// Ledger address.
    #[must_use]
    pub const fn address(&self) -> TokenAddress {
        self.address
    }

    /// Precision.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Whole tokens to raw units.
    #[must_use]
    pub const fn to_raw_amount(&self, whole: u64) -> u128 {
        self.decimals.scale_up(whole)
    }
}
