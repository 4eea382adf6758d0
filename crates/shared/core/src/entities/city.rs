use serde::{Deserialize, Serialize};

use super::TimeZoneSpec;
use crate::values::{Coordinate, LocationKey};

/// A known city with its position and timezone
///
/// Records are immutable once loaded into a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    /// Canonical "city, country" key, unique within a catalog
    #[serde(alias = "searchKey")]
    pub search_key: LocationKey,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA identifier (e.g. `Australia/Melbourne`) or offset descriptor (e.g. `UTC+10`)
    #[serde(alias = "timezoneId")]
    pub timezone_id: String,
}

impl CityRecord {
    pub fn new(
        search_key: impl Into<LocationKey>,
        latitude: f64,
        longitude: f64,
        timezone_id: impl Into<String>,
    ) -> Self {
        Self {
            search_key: search_key.into(),
            latitude,
            longitude,
            timezone_id: timezone_id.into(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Parsed form of `timezone_id`, `None` if it is not a known zone
    pub fn time_zone(&self) -> Option<TimeZoneSpec> {
        TimeZoneSpec::parse(&self.timezone_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_accepts_camel_case_aliases() {
        let json = r#"{
            "searchKey": "melbourne, australia",
            "latitude": -37.8,
            "longitude": 144.9,
            "timezoneId": "Australia/Melbourne"
        }"#;

        let record: CityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.search_key, "melbourne, australia");
        assert_eq!(record.timezone_id, "Australia/Melbourne");
        assert_eq!(record.coordinate(), Coordinate::new(-37.8, 144.9));
        assert!(record.time_zone().is_some());
    }

    #[test]
    fn test_unknown_zone() {
        let record = CityRecord::new("nowhere, sea", 0.0, 0.0, "Atlantis/Capital");
        assert_eq!(record.time_zone(), None);
    }
}
