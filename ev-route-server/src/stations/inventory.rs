//! In-memory station inventory.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Station;
use crate::geometry::BoundingBox;

use super::error::InventoryError;
use super::source::InventorySource;

/// Thread-safe station inventory.
///
/// Readers get a cheap snapshot (`Arc`) of the current station list; a
/// refresh swaps in a new list without disturbing in-flight readers.
#[derive(Clone)]
pub struct StationInventory {
    inner: Arc<RwLock<Arc<Vec<Station>>>>,
    source: Option<InventorySource>,
}

impl StationInventory {
    /// Create an inventory by loading from `source`.
    ///
    /// This will fail if the source is unreadable.
    pub fn load(source: InventorySource) -> Result<Self, InventoryError> {
        let stations = source.load()?;

        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(stations))),
            source: Some(source),
        })
    }

    /// Create a fixed inventory from stations already in memory.
    ///
    /// Refreshing a fixed inventory is a no-op.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(stations))),
            source: None,
        }
    }

    /// Snapshot of every station.
    pub async fn all(&self) -> Arc<Vec<Station>> {
        self.inner.read().await.clone()
    }

    /// Stations located inside `bbox`.
    pub async fn within(&self, bbox: &BoundingBox) -> Vec<Station> {
        let guard = self.inner.read().await;
        guard
            .iter()
            .filter(|s| bbox.contains(&s.location))
            .cloned()
            .collect()
    }

    /// Get the number of stations in the inventory.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the inventory is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Reload the inventory from its source.
    ///
    /// On success, replaces the current station list and returns its size.
    /// On failure, the existing list is preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, InventoryError> {
        let Some(source) = &self.source else {
            return Ok(self.len().await);
        };

        let stations = source.load()?;
        let count = stations.len();

        *self.inner.write().await = Arc::new(stations);

        Ok(count)
    }
}
