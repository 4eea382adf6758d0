use chrono::Duration;
use parking_lot::RwLock;
use std::sync::Arc;
use worldclock_core::Timestamp;
use worldclock_ports::Clock;

/// Clock that only moves when explicitly advanced or set
///
/// Shared behind an `Arc` so a test can hold one handle while the tick
/// loop reads through another.
pub struct ManualClock {
    current_time: RwLock<Timestamp>,
}

impl ManualClock {
    /// Create a manual clock frozen at `start`
    pub fn new(start: Timestamp) -> Arc<Self> {
        Arc::new(Self {
            current_time: RwLock::new(start),
        })
    }

    /// Move the clock forward (or backward, for a negative duration)
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current_time.write();
        *current += duration;
    }

    /// Jump to an arbitrary instant
    ///
    /// Warning: this can move time backwards.
    pub fn set_time(&self, time: Timestamp) {
        *self.current_time.write() = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current_time.read()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
