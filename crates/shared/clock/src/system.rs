use chrono::{Duration, Utc};
use worldclock_core::Timestamp;
use worldclock_ports::Clock;

/// Wall clock, optionally corrected by a fixed skew
///
/// Hosts whose system clock is known to run fast or slow set the
/// correction with [`SystemClock::with_skew`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    skew: Duration,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock reading `skew` ahead of the system time (behind if negative)
    pub fn with_skew(skew: Duration) -> Self {
        Self { skew }
    }

    pub fn skew(&self) -> Duration {
        self.skew
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now() + self.skew
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
