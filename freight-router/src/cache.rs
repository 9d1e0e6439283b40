//! Caching layer for route query results.
//!
//! The snapshot is loaded once and never changes, so a result depends only
//! on `(origin, destination, criterion)`. The TTL bounds memory for rarely
//! repeated queries rather than freshness.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::PortCode;
use crate::planner::{Criterion, RouteResult};

/// Cache key for route results.
type RouteKey = (PortCode, PortCode, Criterion);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache of computed route results.
pub struct RouteCache {
    routes: MokaCache<RouteKey, Arc<RouteResult>>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    /// Get a cached result.
    pub async fn get(
        &self,
        origin: &PortCode,
        destination: &PortCode,
        criterion: Criterion,
    ) -> Option<Arc<RouteResult>> {
        let key = (origin.clone(), destination.clone(), criterion);
        let hit = self.routes.get(&key).await;
        trace!(%origin, %destination, %criterion, hit = hit.is_some(), "Route cache lookup");
        hit
    }

    /// Insert a result into the cache.
    pub async fn insert(
        &self,
        origin: PortCode,
        destination: PortCode,
        criterion: Criterion,
        result: Arc<RouteResult>,
    ) {
        self.routes
            .insert((origin, destination, criterion), result)
            .await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(s: &str) -> PortCode {
        PortCode::parse(s).unwrap()
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(config.max_capacity, 10_000);
    }

    #[test]
    fn cache_creation() {
        let cache = RouteCache::new(&CacheConfig::default());
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn insert_then_get() {
        let cache = RouteCache::new(&CacheConfig::default());
        let result = Arc::new(RouteResult::Unreachable);

        cache
            .insert(port("CNSHA"), port("NLRTM"), Criterion::Fastest, result.clone())
            .await;

        let hit = cache
            .get(&port("CNSHA"), &port("NLRTM"), Criterion::Fastest)
            .await;
        assert_eq!(hit.as_deref(), Some(&RouteResult::Unreachable));
    }

    #[tokio::test]
    async fn key_includes_criterion_and_direction() {
        let cache = RouteCache::new(&CacheConfig::default());
        cache
            .insert(
                port("CNSHA"),
                port("NLRTM"),
                Criterion::Cheapest,
                Arc::new(RouteResult::Unreachable),
            )
            .await;

        assert!(
            cache
                .get(&port("CNSHA"), &port("NLRTM"), Criterion::Fastest)
                .await
                .is_none()
        );
        assert!(
            cache
                .get(&port("NLRTM"), &port("CNSHA"), Criterion::Cheapest)
                .await
                .is_none()
        );
    }
}
