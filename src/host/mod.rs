//! In-memory implementations of the host seams.
//!
//! [`MemoryLedger`] is a complete fungible-token ledger with balances and
//! allowances and an atomic batch settle.  [`EventLog`] records events,
//! [`TracingSink`] logs them, and [`ManualClock`] / [`SystemClock`] supply
//! time.  [`Sandbox`] bundles one of each into a [`Host`](crate::traits::Host)
//! for tests, demos and embedders without a ledger of their own.

mod clocks;
mod ledger;
mod sandbox;
mod sinks;

pub use clocks::{ManualClock, SystemClock};
pub use ledger::MemoryLedger;
pub use sandbox::Sandbox;
pub use sinks::{EventLog, TracingSink};
