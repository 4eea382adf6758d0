//! Worldclock Ports
//!
//! Port definitions (traits) for the worldclock engine.
//! These define the boundaries between the clock engine and whatever
//! supplies wall time, device coordinates, default locations and
//! nearest-city search.

mod clock;
mod error;
mod location;
mod spatial;

pub use clock::Clock;
pub use error::{
    EngineError, EngineResult, GeoError, GeoResult, LocationError, LocationResult,
};
pub use location::{LocationPicker, LocationProvider};
pub use spatial::NearestNeighbor;
