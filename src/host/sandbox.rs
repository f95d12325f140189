//! A complete in-memory host.

use crate::domain::{AccountId, Amount, Timestamp, TokenAddress};
use crate::events::PoolEvent;
use crate::traits::{Clock, EventSink, TokenTransfer, TransferError, TransferLeg};

use super::{EventLog, ManualClock, MemoryLedger};

/// Ledger, event sink and clock bundled into one [`Host`](crate::traits::Host).
///
/// The parts are public so tests and demos can fund accounts, read
/// balances, inspect events and move time between operations.  The sink
/// and clock are generic: `Sandbox<TracingSink, SystemClock>` logs events
/// against wall-clock time instead of recording them.
#[derive(Debug, Clone, Default)]
pub struct Sandbox<S = EventLog, C = ManualClock> {
    /// Token balances and allowances.
    pub ledger: MemoryLedger,
    /// Where pool events go.
    pub events: S,
    /// Source of timestamps.
    pub clock: C,
}

impl Sandbox {
    /// Empty ledger, recording sink, clock at the epoch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, C> Sandbox<S, C> {
    /// Bundles existing parts.
    pub const fn with_parts(ledger: MemoryLedger, events: S, clock: C) -> Self {
        Self {
            ledger,
            events,
            clock,
        }
    }
}

impl<S, C> TokenTransfer for Sandbox<S, C> {
    fn pull(
        &mut self,
        token: TokenAddress,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.ledger.pull(token, owner, spender, amount)
    }

    fn push(
        &mut self,
        token: TokenAddress,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.ledger.push(token, from, to, amount)
    }

    fn refund(
        &mut self,
        token: TokenAddress,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.ledger.refund(token, owner, spender, amount)
    }

    fn settle(&mut self, legs: &[TransferLeg]) -> Result<(), TransferError> {
        self.ledger.settle(legs)
    }
}

impl<S: EventSink, C> EventSink for Sandbox<S, C> {
    fn emit(&mut self, event: PoolEvent) {
        self.events.emit(event);
    }
}

impl<S, C: Clock> Clock for Sandbox<S, C> {
    fn now(&self) -> Timestamp {
        self.clock.now()
    }
}
