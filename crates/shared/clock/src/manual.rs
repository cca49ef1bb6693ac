use chrono::{DateTime, Duration, Utc};
use distmarket_core::Timestamp;
use distmarket_ports::Clock;
use parking_lot::RwLock;

/// Clock whose time only changes through [`advance`](ManualClock::advance)
/// or [`set_time`](ManualClock::set_time)
#[derive(Debug)]
pub struct ManualClock {
    current: RwLock<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: RwLock::new(start),
        }
    }

    /// Clock frozen at 1970-01-01T00:00:00Z
    pub fn starting_at_epoch() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Move time forward by `duration`
    pub fn advance(&self, duration: Duration) {
        *self.current.write() += duration;
    }

    /// Jump to an explicit time
    ///
    /// Moving backwards is allowed here; the event log still keeps its
    /// timestamps non-decreasing.
    pub fn set_time(&self, time: Timestamp) {
        *self.current.write() = time;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at_epoch()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
