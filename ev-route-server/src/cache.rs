//! Caching layer for directions lookups.
//!
//! Directions requests are slow and billed per call, while users tend to
//! repeat the same query within seconds (re-rendering a map, toggling a
//! filter). We cache decoded routes keyed by the exact request.
//!
//! Entries expire after a short TTL and are then treated as absent; expired
//! entries are dropped lazily during the cache's own maintenance, with no
//! background sweeper. A capacity bound keeps memory in check even if the
//! key space turns out to be wide.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Coordinate, Route};

/// Cached routes for one request, fastest first.
pub type RouteEntry = Arc<Vec<Route>>;

/// Cache key for a directions request.
///
/// Coordinates are compared by exact bit pattern, so `1.0` and
/// `1.0000000001` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectionsKey {
    origin: (u64, u64),
    destination: (u64, u64),
    waypoints: Vec<(u64, u64)>,
    alternatives: bool,
}

impl DirectionsKey {
    /// Build a key from the request tuple.
    pub fn new(
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
        alternatives: bool,
    ) -> Self {
        Self {
            origin: origin.to_bits(),
            destination: destination.to_bits(),
            waypoints: waypoints.iter().map(|w| w.to_bits()).collect(),
            alternatives,
        }
    }
}

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
            ttl: Duration::from_secs(25),
            max_capacity: 256,
        }
    }
}

impl CacheConfig {
    /// Set the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the maximum number of entries.
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

/// Cache for decoded directions responses.
pub struct DirectionsCache {
    routes: MokaCache<DirectionsKey, RouteEntry>,
}

impl DirectionsCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    /// Get a cached entry, if present and unexpired.
    pub async fn get(&self, key: &DirectionsKey) -> Option<RouteEntry> {
        self.routes.get(key).await
    }

    /// Insert an entry, replacing any existing one.
    pub async fn insert(&self, key: DirectionsKey, entry: RouteEntry) {
        self.routes.insert(key, entry).await;
    }

    /// Get a cached entry or compute it with `fetch`.
    ///
    /// Concurrent callers with the same key share a single `fetch`; the
    /// others wait for its result. A failed fetch stores nothing and every
    /// waiter receives the same error. If the caller driving `fetch` is
    /// cancelled, a waiting caller takes over.
    pub async fn get_or_fetch<F, E>(&self, key: DirectionsKey, fetch: F) -> Result<RouteEntry, Arc<E>>
    where
        F: Future<Output = Result<RouteEntry, E>>,
        E: Send + Sync + 'static,
    {
        self.routes.try_get_with(key, fetch).await
    }

    /// Get cache statistics (for monitoring).
    ///
    /// The count is updated by pending maintenance, so it can briefly lag
    /// behind inserts and expiries.
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Apply pending maintenance: evict expired entries and refresh counts.
    pub async fn run_pending_tasks(&self) {
        self.routes.run_pending_tasks().await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}
