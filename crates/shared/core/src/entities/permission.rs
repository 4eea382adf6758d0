use serde::{Deserialize, Serialize};

/// Outcome of the device-location permission flow
///
/// Starts `Unknown` and is settled at most once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LocationPermission {
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl LocationPermission {
    /// True once the permission flow has reported either way
    pub fn is_settled(&self) -> bool {
        !matches!(self, LocationPermission::Unknown)
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, LocationPermission::Granted)
    }
}
