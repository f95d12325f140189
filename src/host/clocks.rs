//! Clock implementations.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::Timestamp;
use crate::traits::Clock;

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Timestamp,
}

impl ManualClock {
    /// A clock stopped at `now`.
    #[must_use]
    pub const fn at(now: Timestamp) -> Self {
        Self { now }
    }

    /// Moves the clock to `now`.
    pub fn set(&mut self, now: Timestamp) {
        self.now = now;
    }

    /// Moves the clock forward by `secs`.
    pub fn advance(&mut self, secs: u64) {
        self.now = self.now.saturating_add_secs(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now
    }
}

/// Wall-clock time.  A system clock set before 1970 reads as the epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        Timestamp::from_secs(secs)
    }
}
