//! Ledger account identity.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// An account on the settlement ledger: a provider, a trader, or the
/// pool's own custody account.
///
/// Accounts are opaque to the engine; it only compares and orders them.
/// Like [`TokenAddress`](super::TokenAddress) the text form is 64 hex
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId([u8; 32]);

impl AccountId {
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

    /// The all-zero account, never a valid custody account.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` for the all-zero account.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for AccountId {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| {
            AmmError::InvalidConfiguration("account id must be 64 hex characters")
        })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for AccountId {
    type Error = AmmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.to_string()
    }
}
