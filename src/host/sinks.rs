//! Event sinks.

use tracing::info;

use crate::events::PoolEvent;
use crate::traits::EventSink;

/// Keeps every emitted event in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<PoolEvent>,
}

impl EventLog {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// The most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&PoolEvent> {
        self.events.last()
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes and returns every event.
    pub fn take(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: PoolEvent) {
        self.events.push(event);
    }
}

/// Forwards events to `tracing` at `INFO` under the `twinpool::events`
/// target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: PoolEvent) {
        match event {
            PoolEvent::Swap {
                trader,
                token_in,
                amount_in,
                token_out,
                amount_out,
                reserve_a,
                reserve_b,
                timestamp,
            } => info!(
                target: "twinpool::events",
                %trader, %token_in, %amount_in, %token_out, %amount_out,
                %reserve_a, %reserve_b, %timestamp,
                "swap"
            ),
            PoolEvent::LiquidityAdded {
                provider,
                amount_a,
                amount_b,
                shares,
                reserve_a,
                reserve_b,
                timestamp,
            } => info!(
                target: "twinpool::events",
                %provider, %amount_a, %amount_b, %shares,
                %reserve_a, %reserve_b, %timestamp,
                "liquidity_added"
            ),
            PoolEvent::LiquidityRemoved {
                provider,
                amount_a,
                amount_b,
                shares,
                reserve_a,
                reserve_b,
                timestamp,
            } => info!(
                target: "twinpool::events",
                %provider, %amount_a, %amount_b, %shares,
                %reserve_a, %reserve_b, %timestamp,
                "liquidity_removed"
            ),
        }
    }
}
