//! Notifications a pool publishes after each committed operation.
//!
//! Events are emitted only once the pool state has been committed, so an
//! observer never sees an event for an operation that was rolled back.
//! Reserves carried in an event are the post-commit values.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount, Shares, Timestamp, TokenAddress};

/// A committed pool state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoolEvent {
    /// A trader exchanged one token for the other.
    Swap {
        /// The trader.
        trader: AccountId,
        /// Token paid in.
        token_in: TokenAddress,
        /// Gross amount paid in.
        amount_in: Amount,
        /// Token paid out.
        token_out: TokenAddress,
        /// Amount paid out.
        amount_out: Amount,
        /// Token A reserve after the swap.
        reserve_a: Amount,
        /// Token B reserve after the swap.
        reserve_b: Amount,
        /// Ledger time of the swap.
        timestamp: Timestamp,
    },
    /// A provider deposited both tokens and received shares.
    LiquidityAdded {
        /// The provider.
        provider: AccountId,
        /// Token A deposited.
        amount_a: Amount,
        /// Token B deposited.
        amount_b: Amount,
        /// Shares minted.
        shares: Shares,
        /// Token A reserve after the deposit.
        reserve_a: Amount,
        /// Token B reserve after the deposit.
        reserve_b: Amount,
        /// Ledger time of the deposit.
        timestamp: Timestamp,
    },
    /// A provider burned shares and received both tokens.
    LiquidityRemoved {
        /// The provider.
        provider: AccountId,
        /// Token A paid out.
        amount_a: Amount,
        /// Token B paid out.
        amount_b: Amount,
        /// Shares burned.
        shares: Shares,
        /// Token A reserve after the withdrawal.
        reserve_a: Amount,
        /// Token B reserve after the withdrawal.
        reserve_b: Amount,
        /// Ledger time of the withdrawal.
        timestamp: Timestamp,
    },
}

impl PoolEvent {
    /// Short name of the event kind, matching its serialized tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Swap { .. } => "swap",
            Self::LiquidityAdded { .. } => "liquidity_added",
            Self::LiquidityRemoved { .. } => "liquidity_removed",
        }
    }

    /// Reserves `(a, b)` after the operation.
    pub const fn reserves(&self) -> (Amount, Amount) {
        match self {
            Self::Swap {
                reserve_a,
                reserve_b,
                ..
            }
            | Self::LiquidityAdded {
                reserve_a,
                reserve_b,
                ..
            }
            | Self::LiquidityRemoved {
                reserve_a,
                reserve_b,
                ..
            } => (*reserve_a, *reserve_b),
        }
    }

    /// When the operation committed.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        match self {
            Self::Swap { timestamp, .. }
            | Self::LiquidityAdded { timestamp, .. }
            | Self::LiquidityRemoved { timestamp, .. } => *timestamp,
        }
    }
}
