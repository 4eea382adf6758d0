use async_trait::async_trait;
use worldclock_core::{Coordinate, LocationKey};

use crate::error::LocationResult;

/// Port for the device's own position
///
/// A one-shot query: hosts call it once per session and feed the
/// outcome to the engine. Any failure is treated as a denial.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask the platform for the current position
    async fn current_position(&self) -> LocationResult<Coordinate>;

    /// Get the provider's name/identifier for debugging
    fn name(&self) -> &str {
        "LocationProvider"
    }
}

/// Port supplying a location for newly added clock slots
///
/// Implementations must only return keys present in their catalog.
pub trait LocationPicker: Send {
    /// Pick the next location, or `None` if there is nothing to pick from
    fn pick(&mut self) -> Option<LocationKey>;
}
