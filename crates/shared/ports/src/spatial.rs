use worldclock_core::Coordinate;

/// Port for nearest-city search over a catalog
///
/// Indices refer to catalog iteration order. When several records are
/// equidistant within floating-point tolerance, implementations must
/// return the lowest index so that swapping one index structure for
/// another never changes a result.
pub trait NearestNeighbor: Send + Sync {
    /// Catalog index of the record closest to `point`, `None` if empty
    fn nearest(&self, point: Coordinate) -> Option<usize>;

    /// Get the index's name/identifier for debugging
    fn name(&self) -> &str {
        "NearestNeighbor"
    }
}
