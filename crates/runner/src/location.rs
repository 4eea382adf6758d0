//! Device location providers
//!
//! Adapters for the [`LocationProvider`] port. Platform geolocation
//! lives outside this crate; these cover fixed answers and caching.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use worldclock_core::Coordinate;
use worldclock_ports::{LocationError, LocationProvider, LocationResult};

/// Always answers with the same outcome
///
/// Useful for hosts with a configured position, for "location off"
/// hosts (`denied()`), and in tests.
pub struct StaticLocationProvider {
    outcome: LocationResult<Coordinate>,
}

impl StaticLocationProvider {
    pub fn new(outcome: LocationResult<Coordinate>) -> Self {
        Self { outcome }
    }

    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self::new(Ok(Coordinate::new(latitude, longitude)))
    }

    pub fn denied() -> Self {
        Self::new(Err(LocationError::Denied))
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn current_position(&self) -> LocationResult<Coordinate> {
        self.outcome.clone()
    }

    fn name(&self) -> &str {
        "StaticLocationProvider"
    }
}

/// Reuses a recent successful fix instead of asking again
///
/// Share one instance across sessions so a restarted service picks up
/// the last fix. Failures are never cached.
pub struct CachedLocationProvider {
    inner: Arc<dyn LocationProvider>,
    max_age: Duration,
    last_fix: Mutex<Option<(Instant, Coordinate)>>,
}

impl CachedLocationProvider {
    pub fn new(inner: Arc<dyn LocationProvider>, max_age: Duration) -> Self {
        Self {
            inner,
            max_age,
            last_fix: Mutex::new(None),
        }
    }

    fn cached(&self) -> Option<Coordinate> {
        let last_fix = *self.last_fix.lock();
        last_fix
            .filter(|(taken_at, _)| taken_at.elapsed() <= self.max_age)
            .map(|(_, point)| point)
    }
}

#[async_trait]
impl LocationProvider for CachedLocationProvider {
    async fn current_position(&self) -> LocationResult<Coordinate> {
        if let Some(point) = self.cached() {
            log::trace!("[{}] Serving cached fix", self.inner.name());
            return Ok(point);
        }

        let point = self.inner.current_position().await?;
        *self.last_fix.lock() = Some((Instant::now(), point));
        Ok(point)
    }

    fn name(&self) -> &str {
        "CachedLocationProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts queries and answers from a script
    struct CountingProvider {
        calls: Arc<AtomicUsize>,
        fail_first: bool,
    }

    #[async_trait]
    impl LocationProvider for CountingProvider {
        async fn current_position(&self) -> LocationResult<Coordinate> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && call == 0 {
                return Err(LocationError::Unavailable("no signal".to_string()));
            }
            Ok(Coordinate::new(51.5, -0.1))
        }
    }

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticLocationProvider::at(-37.8, 144.9);
        assert_eq!(
            provider.current_position().await,
            Ok(Coordinate::new(-37.8, 144.9))
        );

        let denied = StaticLocationProvider::denied();
        assert_eq!(denied.current_position().await, Err(LocationError::Denied));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_expires_after_max_age() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = CachedLocationProvider::new(
            Arc::new(CountingProvider {
                calls: calls.clone(),
                fail_first: false,
            }),
            Duration::from_secs(60),
        );

        provider.current_position().await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        provider.current_position().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(31)).await;
        provider.current_position().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = CachedLocationProvider::new(
            Arc::new(CountingProvider {
                calls: calls.clone(),
                fail_first: true,
            }),
            Duration::from_secs(60),
        );

        assert!(provider.current_position().await.is_err());
        assert!(provider.current_position().await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
