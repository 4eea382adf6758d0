//! Host configuration
//!
//! Loaded from JSON; every field is optional and falls back to the
//! defaults below.

use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use worldclock_core::{Coordinate, DisplayFormat, LocationKey};
use worldclock_engine::{DeviceSlotPolicy, EngineConfig, MAX_SLOTS, MIN_SLOTS};
use worldclock_ports::LocationProvider;

use crate::error::ConfigError;
use crate::location::{CachedLocationProvider, StaticLocationProvider};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Tick period while running (ms)
    pub tick_interval_ms: u64,
    /// How long to wait for the device location (ms)
    pub location_timeout_ms: u64,
    /// How long a device fix may be reused (ms)
    pub location_max_age_ms: u64,
    /// Slot locations at startup, in display order
    pub initial_locations: Vec<LocationKey>,
    pub use_24_hour: bool,
    pub device_slot_policy: DeviceSlotPolicy,
    /// Ask for the device location at startup
    pub request_device_location: bool,
    /// Fixed position for hosts without platform geolocation
    pub device_position: Option<Coordinate>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            location_timeout_ms: 5000,
            location_max_age_ms: 60_000,
            initial_locations: vec![
                "melbourne, australia".to_string(),
                "london, united kingdom".to_string(),
            ],
            use_24_hour: false,
            device_slot_policy: DeviceSlotPolicy::ReplaceFirst,
            request_device_location: true,
            device_position: None,
        }
    }
}

impl HostConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn location_timeout(&self) -> Duration {
        Duration::from_millis(self.location_timeout_ms)
    }

    pub fn location_max_age(&self) -> Duration {
        Duration::from_millis(self.location_max_age_ms)
    }

    /// Wrap `provider` so fixes younger than `location_max_age` are reused
    ///
    /// A zero max age disables the cache.
    pub fn cached_location(&self, provider: Arc<dyn LocationProvider>) -> Arc<dyn LocationProvider> {
        if self.location_max_age_ms == 0 {
            return provider;
        }
        Arc::new(CachedLocationProvider::new(provider, self.location_max_age()))
    }

    /// Provider answering with `device_position`, or denying without one
    pub fn static_location(&self) -> Arc<dyn LocationProvider> {
        match self.device_position {
            Some(point) => Arc::new(StaticLocationProvider::new(Ok(point))),
            None => Arc::new(StaticLocationProvider::denied()),
        }
    }

    /// Engine settings carried by this config
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            initial_locations: self.initial_locations.clone(),
            display_format: DisplayFormat::from_24_hour(self.use_24_hour),
            device_slot_policy: self.device_slot_policy,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        let count = self.initial_locations.len();
        if !(MIN_SLOTS..=MAX_SLOTS).contains(&count) {
            return Err(ConfigError::Invalid(format!(
                "initial_locations must hold {}..={} entries, got {}",
                MIN_SLOTS, MAX_SLOTS, count
            )));
        }
        Ok(())
    }
}

/// Load host configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<HostConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load host configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<HostConfig, ConfigError> {
    let config: HostConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = load_config_from_str("{}").unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.location_timeout(), Duration::from_secs(5));
        assert_eq!(config.location_max_age(), Duration::from_secs(60));
        assert_eq!(config.device_position, None);
    }

    #[tokio::test]
    async fn test_device_position() {
        let config = load_config_from_str(
            r#"{ "device_position": { "latitude": 35.7, "longitude": 139.7 } }"#,
        )
        .unwrap();
        let provider = config.static_location();
        assert_eq!(
            provider.current_position().await,
            Ok(Coordinate::new(35.7, 139.7))
        );

        let located_nowhere = HostConfig::default().static_location();
        assert!(located_nowhere.current_position().await.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load_config_from_str(
            r#"{
                "tick_interval_ms": 250,
                "initial_locations": ["tokyo, japan"],
                "use_24_hour": true,
                "device_slot_policy": "preserve_user_edit"
            }"#,
        )
        .unwrap();

        assert_eq!(config.tick_interval_ms, 250);
        let engine = config.engine_config();
        assert_eq!(engine.initial_locations, vec!["tokyo, japan".to_string()]);
        assert!(engine.display_format.is_24_hour());
        assert_eq!(engine.device_slot_policy, DeviceSlotPolicy::PreserveUserEdit);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            load_config_from_str(r#"{ "tick_interval_ms": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_config_from_str(r#"{ "initial_locations": [] }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_config_from_str(r#"{ "initial_locations": ["a", "b", "c", "d", "e"] }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_config_from_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
