//! Pool configuration.
//!
//! [`PoolConfig`] is the declarative description of one pool.  It can be
//! built in code or deserialized from any serde format; either way it is
//! validated before a pool is created from it.

mod pool_config;

pub use pool_config::{PoolConfig, DEFAULT_INITIAL_SHARE_DIVISOR};
