//! Read-only views of engine state for a presentation layer

use serde::Serialize;
use worldclock_core::{DisplayFormat, LocationKey, LocationPermission, Timestamp, TimeZoneSpec};

use crate::state::RunState;

/// The instant a slot shows, paired with where it is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveTime {
    pub location_key: LocationKey,
    pub instant: Timestamp,
    /// True when the slot is pinned to its own override
    pub is_override: bool,
    /// `None` when the slot's key is not in the catalog
    pub time_zone: Option<TimeZoneSpec>,
}

impl EffectiveTime {
    /// Render the wall time at this slot's location
    ///
    /// Unresolved slots render in UTC and say so.
    pub fn format(&self, format: DisplayFormat) -> String {
        let pattern = format.pattern();
        match self.time_zone {
            Some(time_zone) => time_zone.format(self.instant, pattern),
            None => format!("{} UTC", self.instant.format(pattern)),
        }
    }
}

/// One slot as a presentation layer needs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub location_key: LocationKey,
    pub timezone_id: Option<String>,
    pub effective: Timestamp,
    pub is_override: bool,
    /// Slot shows the device's own city
    pub is_device_location: bool,
    pub display: String,
}

/// Point-in-time copy of everything the engine exposes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    pub slots: Vec<SlotView>,
    pub reference: Timestamp,
    pub run_state: RunState,
    pub display_format: DisplayFormat,
    pub permission: LocationPermission,
    pub device_city_key: Option<LocationKey>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(location_key: &str, time_zone: Option<TimeZoneSpec>) -> EffectiveTime {
        EffectiveTime {
            location_key: location_key.to_string(),
            instant: Utc.with_ymd_and_hms(2024, 6, 1, 13, 5, 9).unwrap(),
            is_override: false,
            time_zone,
        }
    }

    #[test]
    fn test_fixed_offset_renders_local_time() {
        let time = at("brisbane, australia", TimeZoneSpec::parse("UTC+10"));

        assert_eq!(time.format(DisplayFormat::TwentyFourHour), "23:05:09");
        assert_eq!(time.format(DisplayFormat::TwelveHour), "11:05:09 PM");
    }

    #[test]
    fn test_named_zone_renders_local_time() {
        // June: London is on BST, Melbourne on standard time
        let london = at("london, united kingdom", TimeZoneSpec::parse("Europe/London"));
        assert_eq!(london.format(DisplayFormat::TwentyFourHour), "14:05:09");

        let melbourne = at("melbourne, australia", TimeZoneSpec::parse("Australia/Melbourne"));
        assert_eq!(melbourne.format(DisplayFormat::TwelveHour), "11:05:09 PM");
    }

    #[test]
    fn test_half_hour_zone() {
        let time = at("kathmandu, nepal", TimeZoneSpec::parse("Asia/Kathmandu"));
        assert_eq!(time.format(DisplayFormat::TwentyFourHour), "18:50:09");
    }

    #[test]
    fn test_unresolved_renders_utc() {
        let time = at("atlantis, sea", None);
        assert_eq!(time.format(DisplayFormat::TwelveHour), "1:05:09 PM UTC");
    }
}
