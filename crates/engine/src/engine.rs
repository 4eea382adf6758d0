//! Clock engine - the shared "now" behind every displayed clock
//!
//! Owns the ordered slot list, the reference timestamp and the
//! running/paused flag. The engine never reads a clock or starts a
//! timer: the host calls [`ClockEngine::advance`] with wall time once
//! per tick, so every operation here is synchronous and deterministic.

use log::{debug, info, warn};
use std::sync::Arc;
use worldclock_core::{
    ClockSlot, Coordinate, DisplayFormat, LocationKey, LocationPermission, Timestamp,
};
use worldclock_geo::{CityCatalog, GeoResolver};
use worldclock_ports::{EngineError, EngineResult, LocationError, LocationPicker, LocationResult};

use crate::config::{DeviceSlotPolicy, EngineConfig, MAX_SLOTS, MIN_SLOTS};
use crate::state::RunState;
use crate::view::{EffectiveTime, EngineSnapshot, SlotView};

/// Multi-clock state machine
pub struct ClockEngine {
    /// Displayed clocks, in display order
    slots: Vec<ClockSlot>,

    /// Shared "now" for every slot without an override
    reference: Timestamp,

    run_state: RunState,

    display_format: DisplayFormat,

    /// Settled at most once per session
    permission: LocationPermission,

    /// Resolved device city once permission is granted
    device_city_key: Option<LocationKey>,

    /// User has relocated slot 0 by hand
    first_slot_edited: bool,

    device_slot_policy: DeviceSlotPolicy,

    /// Nearest-city search, also the catalog for key lookups
    resolver: GeoResolver,

    /// Supplies locations for `add_slot`
    picker: Box<dyn LocationPicker>,
}

impl ClockEngine {
    /// Create a running engine whose reference starts at `start`
    ///
    /// Initial locations beyond `MAX_SLOTS` are dropped; an empty list
    /// is topped up from the picker so the engine always has a slot.
    pub fn new(
        resolver: GeoResolver,
        picker: Box<dyn LocationPicker>,
        start: Timestamp,
        config: EngineConfig,
    ) -> Self {
        let mut engine = Self {
            slots: Vec::with_capacity(MAX_SLOTS),
            reference: start,
            run_state: RunState::Running,
            display_format: config.display_format,
            permission: LocationPermission::Unknown,
            device_city_key: None,
            first_slot_edited: false,
            device_slot_policy: config.device_slot_policy,
            resolver,
            picker,
        };

        if config.initial_locations.len() > MAX_SLOTS {
            warn!(
                "{} initial locations configured, keeping the first {}",
                config.initial_locations.len(),
                MAX_SLOTS
            );
        }
        for key in config.initial_locations.iter().take(MAX_SLOTS) {
            let key = engine.canonical_key(key);
            engine.slots.push(ClockSlot::new(key));
        }
        while engine.slots.len() < MIN_SLOTS {
            let key = engine.next_picked_key();
            engine.slots.push(ClockSlot::new(key));
        }

        info!(
            "Clock engine started with {} slots at {}",
            engine.slots.len(),
            start
        );
        engine
    }

    // ------------------------------------------------------------------
    // Slot list
    // ------------------------------------------------------------------

    /// Append a slot at a picked location; no-op at `MAX_SLOTS`
    pub fn add_slot(&mut self) -> &[ClockSlot] {
        if self.slots.len() >= MAX_SLOTS {
            debug!("add_slot ignored: already at {} slots", MAX_SLOTS);
            return &self.slots;
        }

        let key = self.next_picked_key();
        debug!("Slot {} added: {}", self.slots.len(), key);
        self.slots.push(ClockSlot::new(key));
        &self.slots
    }

    /// Drop the last slot; no-op at `MIN_SLOTS`
    pub fn remove_slot(&mut self) -> &[ClockSlot] {
        if self.slots.len() <= MIN_SLOTS {
            debug!("remove_slot ignored: already at {} slot", MIN_SLOTS);
            return &self.slots;
        }

        if let Some(removed) = self.slots.pop() {
            debug!(
                "Slot {} removed: {}",
                self.slots.len(),
                removed.location_key()
            );
        }
        &self.slots
    }

    /// Move a slot to another location, rejoining shared time
    ///
    /// Keys missing from the catalog are kept as unresolved.
    pub fn set_slot_location(&mut self, index: usize, location_key: &str) -> EngineResult<()> {
        let key = self.canonical_key(location_key);
        let known = self.resolver.catalog().contains(&key);

        let slot = self.slot_mut(index)?;
        debug!("Slot {} relocated: {} -> {}", index, slot.location_key(), key);
        slot.relocate(key);

        if !known {
            warn!("Slot {} set to unknown location: {}", index, location_key.trim());
        }
        if index == 0 {
            self.first_slot_edited = true;
        }
        Ok(())
    }

    /// Pin a slot to its own instant, detaching it from the reference
    pub fn set_slot_override(&mut self, index: usize, at: Timestamp) -> EngineResult<()> {
        let slot = self.slot_mut(index)?;
        slot.pin(at);
        debug!("Slot {} pinned to {}", index, at);
        Ok(())
    }

    /// Return a slot to shared time
    pub fn clear_slot_override(&mut self, index: usize) -> EngineResult<()> {
        let slot = self.slot_mut(index)?;
        slot.unpin();
        debug!("Slot {} following shared time", index);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Timekeeping
    // ------------------------------------------------------------------

    /// Tick: adopt `now` as the reference while running
    ///
    /// Overwrites rather than accumulates, so duplicate ticks are
    /// harmless and the first tick after a resume re-anchors to wall
    /// time. Returns whether the tick was applied.
    pub fn advance(&mut self, now: Timestamp) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        self.reference = now;
        true
    }

    /// Flip between running and paused
    pub fn toggle_running(&mut self) -> RunState {
        self.run_state = self.run_state.toggled();
        match self.run_state {
            RunState::Running => info!("Clocks resumed"),
            RunState::Paused => info!("Clocks paused at {}", self.reference),
        }
        self.run_state
    }

    /// Scrub the shared reference to `at` and pause
    ///
    /// Pausing keeps the next tick from overwriting the scrubbed time;
    /// resuming snaps back to wall time.
    pub fn scrub_reference(&mut self, at: Timestamp) {
        self.reference = at;
        if self.run_state.is_running() {
            self.run_state = RunState::Paused;
        }
        info!("Reference scrubbed to {} (paused)", at);
    }

    pub fn set_display_format(&mut self, use_24_hour: bool) {
        self.display_format = DisplayFormat::from_24_hour(use_24_hour);
    }

    // ------------------------------------------------------------------
    // Device location
    // ------------------------------------------------------------------

    /// Resolve the device position and show it in slot 0
    ///
    /// Only the first report per session is acted on; later calls
    /// return `Ok(None)` without touching state. Invalid coordinates
    /// fail the call and leave the permission unsettled.
    pub fn apply_device_location(
        &mut self,
        latitude: f64,
        longitude: f64,
    ) -> EngineResult<Option<LocationKey>> {
        if self.permission.is_settled() {
            debug!(
                "Device location already {:?}, ignoring new fix",
                self.permission
            );
            return Ok(None);
        }

        let key = self
            .resolver
            .resolve(latitude, longitude)?
            .search_key
            .clone();

        self.permission = LocationPermission::Granted;
        self.device_city_key = Some(key.clone());

        let replace = match self.device_slot_policy {
            DeviceSlotPolicy::ReplaceFirst => true,
            DeviceSlotPolicy::PreserveUserEdit => !self.first_slot_edited,
        };
        if replace {
            if let Some(first) = self.slots.first_mut() {
                first.relocate(key.clone());
            }
            info!("Device location granted: {} (slot 0 updated)", key);
        } else {
            info!("Device location granted: {} (slot 0 kept, user edited)", key);
        }

        Ok(Some(key))
    }

    /// Record that the device location is unavailable
    ///
    /// Non-fatal: slots are untouched.
    pub fn deny_device_location(&mut self, reason: &LocationError) {
        if self.permission.is_settled() {
            debug!("Device location already {:?}, ignoring {}", self.permission, reason);
            return;
        }
        self.permission = LocationPermission::Denied;
        warn!("Device location unavailable: {}", reason);
    }

    /// Feed the outcome of a location query into the engine
    ///
    /// Provider failures are absorbed as a denial; only resolver
    /// errors reach the caller.
    pub fn handle_location_result(
        &mut self,
        outcome: LocationResult<Coordinate>,
    ) -> EngineResult<Option<LocationKey>> {
        match outcome {
            Ok(point) => self.apply_device_location(point.latitude, point.longitude),
            Err(reason) => {
                self.deny_device_location(&reason);
                Ok(None)
            }
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Instant slot `index` displays, with its timezone
    pub fn effective_time(&self, index: usize) -> EngineResult<EffectiveTime> {
        let slot = self.slot(index)?;
        let time_zone = self
            .resolver
            .catalog()
            .get(slot.location_key())
            .and_then(|record| record.time_zone());

        Ok(EffectiveTime {
            location_key: slot.location_key().to_string(),
            instant: slot.effective(self.reference),
            is_override: slot.time().is_fixed(),
            time_zone,
        })
    }

    /// True when slot `index` shows the device's own city
    pub fn is_device_slot(&self, index: usize) -> EngineResult<bool> {
        let slot = self.slot(index)?;
        Ok(self.device_city_key.as_deref() == Some(slot.location_key()))
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let catalog = self.resolver.catalog();
        let slots = self
            .slots
            .iter()
            .map(|slot| {
                let record = catalog.get(slot.location_key());
                let effective = EffectiveTime {
                    location_key: slot.location_key().to_string(),
                    instant: slot.effective(self.reference),
                    is_override: slot.time().is_fixed(),
                    time_zone: record.and_then(|record| record.time_zone()),
                };
                SlotView {
                    display: effective.format(self.display_format),
                    location_key: effective.location_key,
                    timezone_id: record.map(|record| record.timezone_id.clone()),
                    effective: effective.instant,
                    is_override: effective.is_override,
                    is_device_location: self.device_city_key.as_deref()
                        == Some(slot.location_key()),
                }
            })
            .collect();

        EngineSnapshot {
            slots,
            reference: self.reference,
            run_state: self.run_state,
            display_format: self.display_format,
            permission: self.permission,
            device_city_key: self.device_city_key.clone(),
        }
    }

    pub fn slots(&self) -> &[ClockSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> EngineResult<&ClockSlot> {
        self.slots.get(index).ok_or(EngineError::IndexOutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    pub fn reference_timestamp(&self) -> Timestamp {
        self.reference
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state.is_running()
    }

    pub fn display_format(&self) -> DisplayFormat {
        self.display_format
    }

    pub fn use_24_hour(&self) -> bool {
        self.display_format.is_24_hour()
    }

    pub fn permission(&self) -> LocationPermission {
        self.permission
    }

    pub fn device_city_key(&self) -> Option<&str> {
        self.device_city_key.as_deref()
    }

    pub fn catalog(&self) -> &Arc<CityCatalog> {
        self.resolver.catalog()
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn slot_mut(&mut self, index: usize) -> EngineResult<&mut ClockSlot> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(EngineError::IndexOutOfRange { index, len })
    }

    /// Catalog spelling of a key, or the trimmed input if unknown
    fn canonical_key(&self, key: &str) -> LocationKey {
        match self.resolver.catalog().get(key) {
            Some(record) => record.search_key.clone(),
            None => key.trim().to_string(),
        }
    }

    /// Picker's choice, or the first catalog city if it has none
    fn next_picked_key(&mut self) -> LocationKey {
        match self.picker.pick() {
            Some(key) => self.canonical_key(&key),
            None => self
                .resolver
                .catalog()
                .keys()
                .next()
                .map(str::to_string)
                .unwrap_or_default(),
        }
    }
}
