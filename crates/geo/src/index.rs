use worldclock_core::Coordinate;
use worldclock_ports::NearestNeighbor;

use crate::catalog::CityCatalog;
use crate::distance::haversine_km;

/// Distances closer than this are treated as ties (about a micrometre)
pub const TIE_TOLERANCE_KM: f64 = 1e-9;

/// Brute-force nearest-city search
///
/// Scans every record in catalog order. Fine for a few thousand cities.
pub struct LinearScan {
    points: Vec<Coordinate>,
}

impl LinearScan {
    pub fn new(catalog: &CityCatalog) -> Self {
        Self {
            points: catalog.iter().map(|record| record.coordinate()).collect(),
        }
    }
}

impl NearestNeighbor for LinearScan {
    fn nearest(&self, point: Coordinate) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for (index, candidate) in self.points.iter().enumerate() {
            let distance = haversine_km(point, *candidate);
            if !distance.is_finite() {
                log::warn!("Skipping record {}: distance is {}", index, distance);
                continue;
            }
            // Strictly closer by more than the tolerance, so earlier records win ties
            let closer = best.is_none_or(|(_, best_distance)| {
                distance < best_distance - TIE_TOLERANCE_KM
            });
            if closer {
                best = Some((index, distance));
            }
        }

        best.map(|(index, _)| index)
    }

    fn name(&self) -> &str {
        "LinearScan"
    }
}
