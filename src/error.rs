//! Unified error types for the pool engine.
//!
//! Every fallible operation in the crate returns [`AmmError`].  Errors are
//! fail-fast: an operation that returns `Err` has left the pool exactly as
//! it found it.

use thiserror::Error;

use crate::domain::{Amount, Shares};
use crate::traits::TransferError;

/// Errors produced by the pool engine, its quotes and its value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// A deposit, swap or redemption amount is zero or too small to
    /// produce a non-zero result.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// The operation needs funded reserves but the pool is empty.
    #[error("pool has no liquidity")]
    EmptyPool,

    /// A follow-up deposit did not supply enough token B for the current
    /// reserve ratio.
    #[error("deposit ratio mismatch: {required} of token B required, {supplied} supplied")]
    RatioMismatch {
        /// Token B amount implied by the current reserve ratio.
        required: Amount,
        /// Token B amount offered by the caller.
        supplied: Amount,
    },

    /// A redemption asked for more shares than the provider holds.
    #[error("insufficient shares: requested {requested}, available {available}")]
    InsufficientShares {
        /// Shares the caller tried to burn.
        requested: Shares,
        /// Shares the caller actually holds.
        available: Shares,
    },

    /// The swap would pay out nothing, or would drain the output reserve.
    #[error("swap output is zero or would drain the reserve")]
    InsufficientOutput,

    /// The swap output is below the caller's minimum.
    #[error("slippage exceeded: minimum {minimum}, actual {actual}")]
    SlippageExceeded {
        /// Minimum acceptable output requested by the caller.
        minimum: Amount,
        /// Output the pool would actually pay.
        actual: Amount,
    },

    /// The token transfer collaborator refused a leg of the settlement.
    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// A token is not part of the pool pair, or a pair is malformed.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A pool configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A decimals value is out of range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// A staged transition would break a pool invariant.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountId, TokenAddress};

    #[test]
    fn display_is_human_readable() {
        let err = AmmError::RatioMismatch {
            required: Amount::new(50),
            supplied: Amount::new(49),
        };
        assert_eq!(
            err.to_string(),
            "deposit ratio mismatch: 50 of token B required, 49 supplied"
        );
        assert_eq!(AmmError::EmptyPool.to_string(), "pool has no liquidity");
    }

    #[test]
    fn transfer_errors_convert() {
        let cause = TransferError::InsufficientAllowance {
            token: TokenAddress::from_bytes([1u8; 32]),
            owner: AccountId::from_bytes([2u8; 32]),
            needed: Amount::new(10),
            approved: Amount::new(3),
        };
        let err: AmmError = cause.clone().into();
        assert_eq!(err, AmmError::Transfer(cause));
    }

    #[test]
    fn errors_are_cloneable_and_comparable() {
        let a = AmmError::Overflow("x");
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, AmmError::Underflow("x"));
    }
}
