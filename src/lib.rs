//! # twinpool
//!
//! Two-asset constant-product AMM engine with share accounting and
//! pluggable settlement.
//!
//! A [`Pool`](pool::Pool) holds reserves of two tokens, issues
//! proportional liquidity shares to depositors and prices swaps on the
//! `x * y = k` curve.  All arithmetic is integer arithmetic on raw token
//! units with explicit, pool-favouring rounding and 256-bit intermediates.
//!
//! The engine never touches balances itself.  Every state-changing
//! operation takes a [`Host`](traits::Host): something that can move
//! tokens, accept events and tell the time.  The [`host`] module ships an
//! in-memory implementation.
//!
//! ## Create a pool and execute a swap
//!
//! ```rust
//! use twinpool::config::PoolConfig;
//! use twinpool::domain::{AccountId, Amount, FeeTier, Token, TokenAddress, TokenPair};
//! use twinpool::host::Sandbox;
//! use twinpool::pool::Pool;
//!
//! // 1. Two 18-decimal tokens and the account that holds the reserves
//! let tok_a = Token::with_max_precision(TokenAddress::from_bytes([1u8; 32]));
//! let tok_b = Token::with_max_precision(TokenAddress::from_bytes([2u8; 32]));
//! let custody = AccountId::from_bytes([0xcc; 32]);
//! let alice = AccountId::from_bytes([0xa1; 32]);
//!
//! // 2. Fund and approve
//! let mut host = Sandbox::new();
//! for token in [tok_a, tok_b] {
//!     host.ledger
//!         .mint(token.address(), alice, Amount::new(1_000_000))
//!         .expect("mint");
//!     host.ledger
//!         .approve(token.address(), alice, custody, Amount::MAX);
//! }
//!
//! // 3. Build the pool
//! let pair = TokenPair::new(tok_a, tok_b).expect("distinct tokens");
//! let config = PoolConfig::with_defaults(pair, custody).expect("valid config");
//! let mut pool = Pool::new(config).expect("pool created");
//!
//! // 4. Seed it and trade
//! pool.add_liquidity(&mut host, alice, Amount::new(100_000), Amount::new(50_000))
//!     .expect("deposit");
//! let result = pool
//!     .swap_token_a(&mut host, alice, Amount::new(1_000), None)
//!     .expect("swap");
//!
//! assert!(result.amount_out().get() > 0);
//! assert_eq!(host.events.len(), 2);
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Token`](domain::Token), receipts |
//! | [`math`]   | Checked and wide arithmetic, curve formulas |
//! | [`pool`]   | [`Pool`](pool::Pool) and its [`PoolState`](pool::PoolState) |
//! | [`traits`] | Host seams: [`TokenTransfer`](traits::TokenTransfer), [`EventSink`](traits::EventSink), [`Clock`](traits::Clock) |
//! | [`host`]   | In-memory ledger, event sinks, clocks, [`Sandbox`](host::Sandbox) |
//! | [`events`] | [`PoolEvent`](events::PoolEvent) records |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) |
//! | [`error`]  | [`AmmError`](error::AmmError) |
//! | [`prelude`] | Common re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod host;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod traits;
