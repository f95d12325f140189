//! Source of ledger time.

use crate::domain::Timestamp;

/// Supplies the timestamp recorded on each committed transition.
pub trait Clock {
    /// Current ledger time.
    fn now(&self) -> Timestamp;
}
