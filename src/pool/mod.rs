//! The pool engine and its bookkeeping.

mod engine;
mod state;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use engine::{Pool, PoolSnapshot};
pub use state::PoolState;
