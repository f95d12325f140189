//! Value types of the pool domain.
//!
//! Quantities ([`Amount`], [`Shares`]), identities ([`TokenAddress`],
//! [`AccountId`], [`Token`], [`TokenPair`]), pricing parameters
//! ([`BasisPoints`], [`FeeTier`], [`Rounding`], [`Decimals`]) and the
//! receipts returned by pool operations.  Every type is a newtype or a
//! small validated struct; none of them performs I/O.

mod account_id;
mod amount;
mod basis_points;
mod decimals;
mod fee_tier;
mod liquidity_change;
mod rounding;
mod shares;
mod swap_result;
mod timestamp;
mod token;
mod token_address;
mod token_pair;

pub use account_id::AccountId;
pub use amount::Amount;
pub use basis_points::BasisPoints;
pub(crate) use basis_points::BPS_DENOMINATOR;
pub use decimals::Decimals;
pub use fee_tier::FeeTier;
pub use liquidity_change::{Deposit, Withdrawal};
pub use rounding::Rounding;
pub use shares::{Shares, SHARE_DECIMALS};
pub use swap_result::SwapResult;
pub use timestamp::Timestamp;
pub use token::Token;
pub use token_address::TokenAddress;
pub use token_pair::TokenPair;
