use worldclock_core::Timestamp;

/// Port for wall-clock time
///
/// The tick source reads this once per tick and hands the result to
/// the engine, so hosts can swap in:
/// - Real system time for production
/// - A manually driven clock for deterministic tests
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
