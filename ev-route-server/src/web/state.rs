//! Application state for the web layer.

use std::sync::Arc;

use crate::directions::DirectionsBackend;
use crate::planner::RoutePlanner;
use crate::stations::StationInventory;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route planner, owning the directions cache
    pub planner: Arc<RoutePlanner<DirectionsBackend>>,

    /// Charging stations to rank against routes
    pub inventory: StationInventory,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: RoutePlanner<DirectionsBackend>, inventory: StationInventory) -> Self {
        Self {
            planner: Arc::new(planner),
            inventory,
        }
    }
}
