use std::sync::Arc;
use worldclock_core::{CityRecord, Coordinate};
use worldclock_ports::{GeoError, GeoResult, NearestNeighbor};

use crate::catalog::CityCatalog;
use crate::index::LinearScan;

/// Resolves a coordinate to the closest catalog city
///
/// Pure: the result depends only on the catalog and the query point.
/// The search structure is pluggable; every [`NearestNeighbor`] shares
/// the same lowest-index tie-break, so swapping one never changes an answer.
pub struct GeoResolver {
    catalog: Arc<CityCatalog>,
    index: Box<dyn NearestNeighbor>,
}

impl GeoResolver {
    /// Resolver backed by a linear scan of the catalog
    pub fn new(catalog: Arc<CityCatalog>) -> Self {
        let index = LinearScan::new(&catalog);
        Self::with_index(catalog, Box::new(index))
    }

    /// Resolver backed by a custom index built over `catalog`
    pub fn with_index(catalog: Arc<CityCatalog>, index: Box<dyn NearestNeighbor>) -> Self {
        Self { catalog, index }
    }

    /// Closest city to (`latitude`, `longitude`)
    ///
    /// Fails with [`GeoError::InvalidCoordinate`] on NaN or infinite input.
    pub fn resolve(&self, latitude: f64, longitude: f64) -> GeoResult<&CityRecord> {
        self.resolve_point(Coordinate::new(latitude, longitude))
    }

    pub fn resolve_point(&self, point: Coordinate) -> GeoResult<&CityRecord> {
        if !point.is_finite() {
            return Err(GeoError::InvalidCoordinate {
                latitude: point.latitude,
                longitude: point.longitude,
            });
        }

        let record = self
            .index
            .nearest(point)
            .and_then(|index| self.catalog.record(index))
            .ok_or(GeoError::EmptyCatalog)?;

        log::trace!(
            "[{}] ({}, {}) -> {}",
            self.index.name(),
            point.latitude,
            point.longitude,
            record.search_key
        );
        Ok(record)
    }

    pub fn catalog(&self) -> &Arc<CityCatalog> {
        &self.catalog
    }
}
