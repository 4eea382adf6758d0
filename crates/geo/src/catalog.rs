//! City catalog - the static table every location key resolves against
//!
//! Records keep the order they were loaded in; that order is what the
//! nearest-city tie-break refers to.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use worldclock_core::{CityRecord, LocationKey};

use crate::error::{CatalogError, Result};

/// On-disk catalog layout: `{ "cities": [ ... ] }`
#[derive(Debug, Deserialize)]
struct CatalogFile {
    cities: Vec<CityRecord>,
}

/// Ordered, read-only set of city records with lookup by search key
///
/// Keys are stored lower-cased and trimmed; lookups apply the same
/// normalisation.
#[derive(Debug, Clone)]
pub struct CityCatalog {
    records: Vec<CityRecord>,
    by_key: HashMap<LocationKey, usize>,
}

impl CityCatalog {
    /// Build a catalog, rejecting empty input, duplicate keys,
    /// non-finite coordinates and unknown timezones
    pub fn new(records: Vec<CityRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut normalized = Vec::with_capacity(records.len());
        let mut by_key = HashMap::with_capacity(records.len());

        for mut record in records {
            record.search_key = normalize_key(&record.search_key);

            if !record.coordinate().is_finite() {
                return Err(CatalogError::InvalidCoordinate {
                    key: record.search_key,
                    latitude: record.latitude,
                    longitude: record.longitude,
                });
            }
            if record.time_zone().is_none() {
                return Err(CatalogError::UnknownTimeZone {
                    key: record.search_key,
                    timezone_id: record.timezone_id,
                });
            }
            if by_key.contains_key(&record.search_key) {
                return Err(CatalogError::DuplicateKey(record.search_key));
            }

            by_key.insert(record.search_key.clone(), normalized.len());
            normalized.push(record);
        }

        Ok(Self {
            records: normalized,
            by_key,
        })
    }

    /// Load a catalog from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.cities)
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The catalog shipped with the crate
    pub fn embedded() -> Result<Self> {
        let catalog = Self::from_json_str(include_str!("data/cities.json"))?;
        log::debug!("Loaded embedded city catalog ({} cities)", catalog.len());
        Ok(catalog)
    }

    /// Exact lookup by search key
    pub fn get(&self, key: &str) -> Option<&CityRecord> {
        self.by_key
            .get(&normalize_key(key))
            .and_then(|&index| self.records.get(index))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(&normalize_key(key))
    }

    /// Record at a position in catalog order
    pub fn record(&self, index: usize) -> Option<&CityRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[CityRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &CityRecord> {
        self.records.iter()
    }

    /// Search keys in catalog order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.search_key.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn normalize_key(key: &str) -> LocationKey {
    key.trim().to_lowercase()
}
