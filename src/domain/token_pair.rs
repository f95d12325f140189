//! The two tokens a pool trades.

use serde::{Deserialize, Serialize};

use super::{Token, TokenAddress};
use crate::error::AmmError;

/// Two distinct tokens in the order the pool was created with.
///
/// The first token is the pool's token A and the second its token B.  The
/// order is kept as given: it decides which reserve is `reserve_a` and
/// which token defines the first-deposit share unit.
///
/// # Examples
///
/// ```
/// use twinpool::domain::{Token, TokenAddress, TokenPair};
///
/// let a = Token::with_max_precision(TokenAddress::from_bytes([2u8; 32]));
/// let b = Token::with_max_precision(TokenAddress::from_bytes([1u8; 32]));
/// let pair = TokenPair::new(a, b).expect("distinct tokens");
/// assert_eq!(pair.first(), a);
/// assert_eq!(pair.other(&a.address()).expect("member"), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PairRepr", into = "PairRepr")]
pub struct TokenPair {
    token_a: Token,
    token_b: Token,
}

#[derive(Serialize, Deserialize)]
struct PairRepr {
    token_a: Token,
    token_b: Token,
}

impl TokenPair {
    /// Pairs `token_a` with `token_b`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if both share an address.
    pub fn new(token_a: Token, token_b: Token) -> Result<Self, AmmError> {
        if token_a.address() == token_b.address() {
            return Err(AmmError::InvalidToken(
                "token pair requires two distinct addresses",
            ));
        }
        Ok(Self { token_a, token_b })
    }

    /// Token A.
    #[must_use]
    pub const fn first(&self) -> Token {
        self.token_a
    }

    /// Token B.
    #[must_use]
    pub const fn second(&self) -> Token {
        self.token_b
    }

    /// Returns `true` if `address` is token A.
    #[must_use]
    pub fn is_first(&self, address: &TokenAddress) -> bool {
        self.token_a.address() == *address
    }

    /// The counterpart of `address` within the pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `address` is not in the pair.
    pub fn other(&self, address: &TokenAddress) -> Result<Token, AmmError> {
        if self.token_a.address() == *address {
            Ok(self.token_b)
        } else if self.token_b.address() == *address {
            Ok(self.token_a)
        } else {
            Err(AmmError::InvalidToken("token is not part of this pair"))
        }
    }
}

impl TryFrom<PairRepr> for TokenPair {
    type Error = AmmError;

    fn try_from(value: PairRepr) -> Result<Self, Self::Error> {
        Self::new(value.token_a, value.token_b)
    }
}

impl From<TokenPair> for PairRepr {
    fn from(value: TokenPair) -> Self {
        Self {
            token_a: value.token_a,
            token_b: value.token_b,
        }
    }
}
