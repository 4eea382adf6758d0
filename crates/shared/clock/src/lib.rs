//! Worldclock Clock Sources
//!
//! Implementations of the [`Clock`] port read by the tick loop:
//!
//! - [`SystemClock`]: the real wall clock, for production hosts
//! - [`ManualClock`]: only moves when told to, for deterministic tests
//!   and for replaying a scripted timeline
//!
//! ## Usage
//!
//! ```ignore
//! use worldclock_clock::{Clock, ManualClock};
//! use chrono::Duration;
//!
//! let clock = ManualClock::new(start);
//! clock.advance(Duration::seconds(1));
//! engine.advance(clock.now());
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use worldclock_ports::Clock;
