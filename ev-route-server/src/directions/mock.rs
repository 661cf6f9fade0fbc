//! Mock directions client for development without API access.
//!
//! Serves a recorded Directions response loaded from a JSON file, as if it
//! were live. Every request gets the same routes regardless of its
//! coordinates.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use super::DirectionsProvider;
use super::error::DirectionsError;
use super::types::{DirectionsRequest, DirectionsResponse};

/// Mock directions client that serves a recorded response.
#[derive(Clone)]
pub struct MockDirectionsClient {
    response: Arc<RwLock<DirectionsResponse>>,
    calls: Arc<AtomicUsize>,
}

impl MockDirectionsClient {
    /// Create a mock client serving `response`.
    pub fn new(response: DirectionsResponse) -> Self {
        Self {
            response: Arc::new(RwLock::new(response)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock client from a recorded Directions JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DirectionsError> {
        Ok(Self::new(read_response(path.as_ref())?))
    }

    /// Number of requests served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Reload the recorded response from disk (useful for development).
    pub async fn reload(&self, path: impl AsRef<Path>) -> Result<(), DirectionsError> {
        let fresh = read_response(path.as_ref())?;
        *self.response.write().await = fresh;
        Ok(())
    }
}

fn read_response(path: &Path) -> Result<DirectionsResponse, DirectionsError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        DirectionsError::NotConfigured(format!("failed to read {}: {e}", path.display()))
    })?;

    serde_json::from_str(&json).map_err(|e| DirectionsError::Json {
        message: format!("failed to parse {}: {e}", path.display()),
        body: None,
    })
}

impl DirectionsProvider for MockDirectionsClient {
    async fn directions(
        &self,
        _request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.read().await.clone())
    }
}
