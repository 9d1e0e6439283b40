//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, RouteCache};
use crate::planner::SearchConfig;
use crate::snapshot::Snapshot;

/// Shared application state.
///
/// The snapshot is immutable for the life of the process, so handlers read
/// it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Sailings, rates and exchange rates
    pub snapshot: Arc<Snapshot>,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,

    /// Computed route results
    pub cache: Arc<RouteCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(snapshot: Snapshot, config: SearchConfig, cache_config: &CacheConfig) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            config: Arc::new(config),
            cache: Arc::new(RouteCache::new(cache_config)),
        }
    }
}
