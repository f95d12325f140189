//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use twinpool::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, BasisPoints, Decimals, Deposit, FeeTier, Rounding, Shares, SwapResult,
    Timestamp, Token, TokenAddress, TokenPair, Withdrawal,
};

pub use crate::traits::{Clock, EventSink, FromConfig, Host, TokenTransfer, TransferError};

pub use crate::config::PoolConfig;

pub use crate::error::{AmmError, Result};

pub use crate::events::PoolEvent;

pub use crate::pool::{Pool, PoolSnapshot};
