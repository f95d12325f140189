//! Receipts for liquidity deposits and withdrawals.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Shares};

/// What a provider paid in and received for an add-liquidity call.
///
/// `amount_b` is the amount actually pulled, which on a subsequent deposit
/// is the ratio-derived amount and may be below what the caller offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deposit {
    /// Token A pulled from the provider.
    pub amount_a: Amount,
    /// Token B pulled from the provider.
    pub amount_b: Amount,
    /// Shares minted to the provider.
    pub shares: Shares,
}

/// What a provider burned and received for a remove-liquidity call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Token A pushed to the provider.
    pub amount_a: Amount,
    /// Token B pushed to the provider.
    pub amount_b: Amount,
    /// Shares burned.
    pub shares: Shares,
}

impl fmt::Display for Deposit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "deposit {} A + {} B for {} shares",
            self.amount_a, self.amount_b, self.shares
        )
    }
}

impl fmt::Display for Withdrawal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "withdraw {} A + {} B for {} shares",
            self.amount_a, self.amount_b, self.shares
        )
    }
}
