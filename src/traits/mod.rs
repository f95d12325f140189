//! Seams between the pool engine and its environment.
//!
//! The engine owns pricing and bookkeeping only.  Moving tokens
//! ([`TokenTransfer`]), publishing events ([`EventSink`]) and reading the
//! time ([`Clock`]) are delegated to collaborators supplied per call.
//! Anything implementing all three is a [`Host`].

mod clock;
mod event_sink;
mod from_config;
mod token_transfer;

pub use clock::Clock;
pub use event_sink::EventSink;
pub use from_config::FromConfig;
pub use token_transfer::{TokenTransfer, TransferError, TransferLeg};

/// Everything a pool operation needs from its environment.
pub trait Host: TokenTransfer + EventSink + Clock {}

impl<T: TokenTransfer + EventSink + Clock + ?Sized> Host for T {}
