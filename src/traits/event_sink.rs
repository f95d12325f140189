//! Where committed pool events go.

use crate::events::PoolEvent;

/// Receives [`PoolEvent`]s after each committed operation.
///
/// Emission cannot fail: by the time an event exists the operation has
/// already committed, so a sink that needs fallible I/O must buffer.
pub trait EventSink {
    /// Records one event.
    fn emit(&mut self, event: PoolEvent);
}

impl EventSink for Vec<PoolEvent> {
    fn emit(&mut self, event: PoolEvent) {
        self.push(event);
    }
}
