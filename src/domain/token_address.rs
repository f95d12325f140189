//! Ledger address of a fungible token.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Identifies a token contract on the settlement ledger.
///
/// Wraps 32 raw bytes.  The text form (used by `Display`, `FromStr` and
/// serde) is 64 lowercase hex characters, so addresses read naturally in
/// TOML or JSON configuration.
///
/// # Examples
///
/// ```
/// use twinpool::domain::TokenAddress;
///
/// let addr = TokenAddress::from_bytes([0xab; 32]);
/// let parsed: TokenAddress = addr.to_string().parse().expect("valid hex");
/// assert_eq!(parsed, addr);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAddress([u8; 32]);

impl TokenAddress {
    /// Wraps raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// The all-zero address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for TokenAddress {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| AmmError::InvalidToken("token address must be 64 hex characters"))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for TokenAddress {
    type Error = AmmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TokenAddress> for String {
    fn from(value: TokenAddress) -> Self {
        value.to_string()
    }
}
