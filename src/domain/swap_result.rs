//! Outcome of a swap or swap quote.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, TokenAddress};
use crate::error::AmmError;

/// What a swap took in, paid out and withheld as fee.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee < amount_in`, so some input always reaches the curve.
/// - `token_in != token_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapResult {
    token_in: TokenAddress,
    token_out: TokenAddress,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapResult {
    /// Validates and builds a swap outcome.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] on a zero amount or a fee that eats
    ///   the whole input.
    /// - [`AmmError::InvalidToken`] if both tokens are the same.
    pub fn new(
        token_in: TokenAddress,
        token_out: TokenAddress,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> crate::error::Result<Self> {
        if token_in == token_out {
            return Err(AmmError::InvalidToken("swap needs two different tokens"));
        }
        if amount_in.is_zero() {
            return Err(AmmError::InvalidAmount("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(AmmError::InvalidAmount("amount_out must be positive"));
        }
        if fee >= amount_in {
            return Err(AmmError::InvalidAmount("fee must be less than amount_in"));
        }
        Ok(Self {
            token_in,
            token_out,
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Token paid in by the trader.
    #[must_use]
    pub const fn token_in(&self) -> TokenAddress {
        self.token_in
    }

    /// Token paid out to the trader.
    #[must_use]
    pub const fn token_out(&self) -> TokenAddress {
        self.token_out
    }

    /// Gross input, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Output delivered to the trader.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Part of the input withheld as fee.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Input that was priced by the curve, `amount_in - fee`.
    pub const fn net_in(&self) -> Amount {
        Amount::new(self.amount_in.get() - self.fee.get())
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "swap {} in -> {} out (fee {})",
            self.amount_in, self.amount_out, self.fee
        )
    }
}
