use worldclock_core::Coordinate;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance between two points in kilometres (haversine)
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();

    let delta_phi = (to.latitude - from.latitude).to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    // Rounding can push `a` just past 1 near antipodes
    let a = ((delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        let point = Coordinate::new(-37.8, 144.9);
        assert!(haversine_km(point, point).abs() < 1e-9);
    }

    #[test]
    fn test_london_to_paris() {
        let london = Coordinate::new(51.5074, -0.1278);
        let paris = Coordinate::new(48.8566, 2.3522);

        let km = haversine_km(london, paris);
        assert!((km - 343.5).abs() < 2.0, "got {km}");
    }

    #[test]
    fn test_antipode_is_half_circumference() {
        let point = Coordinate::new(-6.377647337239125, -146.93007968748378);
        let antipode = Coordinate::new(-point.latitude, point.longitude + 180.0);

        let km = haversine_km(point, antipode);
        assert!(km.is_finite(), "got {km}");
        assert!((km - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6, "got {km}");
    }

    #[test]
    fn test_symmetric_across_antimeridian() {
        let west = Coordinate::new(0.0, 179.5);
        let east = Coordinate::new(0.0, -179.5);

        let km = haversine_km(west, east);
        assert!((km - haversine_km(east, west)).abs() < 1e-9);
        // One degree of longitude at the equator
        assert!((km - 111.19).abs() < 0.1, "got {km}");
    }
}
