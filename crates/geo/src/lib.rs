//! Worldclock Geo
//!
//! Location resolution for the clock engine:
//!
//! - **Catalog**: the static, ordered table of known cities and their timezones
//! - **Resolver**: nearest city to a coordinate (haversine distance)
//! - **Index**: pluggable nearest-neighbour search, linear scan by default
//! - **Pickers**: default locations for newly added slots
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use worldclock_geo::{CityCatalog, GeoResolver};
//!
//! let catalog = Arc::new(CityCatalog::embedded()?);
//! let resolver = GeoResolver::new(catalog);
//!
//! let city = resolver.resolve(-37.0, 145.0)?;
//! assert_eq!(city.search_key, "melbourne, australia");
//! ```

pub mod catalog;
pub mod distance;
pub mod error;
pub mod index;
pub mod picker;
pub mod resolver;

pub use catalog::CityCatalog;
pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use error::CatalogError;
pub use index::{LinearScan, TIE_TOLERANCE_KM};
pub use picker::{RandomCityPicker, SequentialPicker};
pub use resolver::GeoResolver;
