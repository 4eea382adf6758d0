//! Worldclock Core Domain
//!
//! Pure domain types for the worldclock multi-clock engine.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    CityRecord, ClockSlot, DisplayFormat, LocationPermission, SlotTime, TimeZoneSpec,
};
pub use values::{Coordinate, LocationKey, Timestamp};
