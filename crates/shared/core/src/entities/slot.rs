use serde::{Deserialize, Serialize};

use crate::values::{LocationKey, Timestamp};

/// Which instant a slot displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SlotTime {
    /// Follows the engine's shared reference timestamp
    #[default]
    Shared,
    /// Pinned to a custom instant until cleared
    Fixed(Timestamp),
}

impl SlotTime {
    /// Resolve against the shared reference timestamp
    pub fn resolve(&self, reference: Timestamp) -> Timestamp {
        match self {
            SlotTime::Shared => reference,
            SlotTime::Fixed(at) => *at,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, SlotTime::Fixed(_))
    }

    pub fn override_timestamp(&self) -> Option<Timestamp> {
        match self {
            SlotTime::Shared => None,
            SlotTime::Fixed(at) => Some(*at),
        }
    }
}

/// One displayed clock: a location plus its time source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockSlot {
    location_key: LocationKey,
    time: SlotTime,
}

impl ClockSlot {
    /// Create a slot that follows shared time
    pub fn new(location_key: impl Into<LocationKey>) -> Self {
        Self {
            location_key: location_key.into(),
            time: SlotTime::Shared,
        }
    }

    pub fn location_key(&self) -> &str {
        &self.location_key
    }

    pub fn time(&self) -> SlotTime {
        self.time
    }

    /// Move the slot to another location
    ///
    /// A relocated slot always rejoins shared time.
    pub fn relocate(&mut self, location_key: impl Into<LocationKey>) {
        self.location_key = location_key.into();
        self.time = SlotTime::Shared;
    }

    pub fn pin(&mut self, at: Timestamp) {
        self.time = SlotTime::Fixed(at);
    }

    pub fn unpin(&mut self) {
        self.time = SlotTime::Shared;
    }

    /// Instant this slot displays given the shared reference
    pub fn effective(&self, reference: Timestamp) -> Timestamp {
        self.time.resolve(reference)
    }
}
