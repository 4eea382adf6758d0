//! Catalog loading errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate search key: {0}")]
    DuplicateKey(String),

    #[error("Invalid coordinate for {key}: latitude={latitude}, longitude={longitude}")]
    InvalidCoordinate {
        key: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("Unknown timezone for {key}: {timezone_id}")]
    UnknownTimeZone { key: String, timezone_id: String },

    #[error("Catalog contains no cities")]
    Empty,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
