use thiserror::Error;

/// Errors from nearest-city resolution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("Invalid coordinate: latitude={latitude}, longitude={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("City catalog is empty")]
    EmptyCatalog,
}

pub type GeoResult<T> = std::result::Result<T, GeoError>;

/// Errors from clock engine operations
///
/// A failed operation leaves the engine state unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Slot index {index} out of range (slots: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Location resolution failed: {0}")]
    Geo(#[from] GeoError),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Failures reported by a device location provider
///
/// These are absorbed by the engine as a denied permission and never
/// surface from engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location permission denied")]
    Denied,

    #[error("Location request timed out")]
    Timeout,

    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

pub type LocationResult<T> = std::result::Result<T, LocationError>;
