//! Worldclock Runner - hosting the clock engine
//!
//! Everything the engine deliberately leaves to its host:
//!
//! - **Config**: JSON host configuration with defaults
//! - **Service**: single task owning the engine, fed by commands and a 1 Hz tick
//! - **Location**: device position providers (fixed, cached)
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use worldclock_clock::SystemClock;
//! use worldclock_geo::CityCatalog;
//! use worldclock_runner::{ClockService, HostConfig, StaticLocationProvider};
//!
//! let catalog = Arc::new(CityCatalog::embedded()?);
//! let (clocks, task) = ClockService::spawn(
//!     HostConfig::default(),
//!     catalog,
//!     Arc::new(SystemClock::new()),
//!     Arc::new(StaticLocationProvider::denied()),
//! );
//!
//! clocks.add_slot().await?;
//! let mut feed = clocks.subscribe();
//! while feed.changed().await.is_ok() {
//!     render(&feed.borrow());
//! }
//! ```

pub mod config;
pub mod error;
pub mod location;
pub mod service;

// Re-export main types
pub use config::{HostConfig, load_config, load_config_from_str};
pub use error::{ConfigError, HostError};
pub use location::{CachedLocationProvider, StaticLocationProvider};
pub use service::{ClockHandle, ClockService};
