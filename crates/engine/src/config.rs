use serde::{Deserialize, Serialize};
use worldclock_core::{DisplayFormat, LocationKey};

/// Fewest clocks the engine will hold
pub const MIN_SLOTS: usize = 1;

/// Most clocks the engine will hold
pub const MAX_SLOTS: usize = 4;

/// What a granted device location does to slot 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceSlotPolicy {
    /// Always move slot 0 to the device city and clear its override
    #[default]
    ReplaceFirst,
    /// Leave slot 0 alone if the user has already relocated it
    PreserveUserEdit,
}

/// Initial engine state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Slot locations in display order (clamped to `MIN_SLOTS..=MAX_SLOTS`)
    pub initial_locations: Vec<LocationKey>,
    pub display_format: DisplayFormat,
    pub device_slot_policy: DeviceSlotPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_locations: vec![
                "melbourne, australia".to_string(),
                "london, united kingdom".to_string(),
            ],
            display_format: DisplayFormat::TwelveHour,
            device_slot_policy: DeviceSlotPolicy::ReplaceFirst,
        }
    }
}
