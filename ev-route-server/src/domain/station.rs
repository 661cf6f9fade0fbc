//! Charging station records.

use super::Coordinate;

/// A charging station from the inventory.
///
/// Everything except `distance_to_route_km` is owned by the inventory.
/// The distance is `None` until the station has been ranked against a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub location: Coordinate,

    /// Highest charger power at this station (kW).
    pub max_power_kw: f64,

    /// Number of chargers at this station.
    pub charger_count: u32,

    /// Approximate distance to the route (km, 2 decimal places).
    pub distance_to_route_km: Option<f64>,
}

impl Station {
    /// Create an unannotated station with no chargers.
    pub fn new(id: i64, location: Coordinate) -> Self {
        Self {
            id,
            name: None,
            address: None,
            location,
            max_power_kw: 0.0,
            charger_count: 0,
            distance_to_route_km: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set charger aggregates.
    pub fn with_chargers(mut self, max_power_kw: f64, charger_count: u32) -> Self {
        self.max_power_kw = max_power_kw;
        self.charger_count = charger_count;
        self
    }

    /// Copy of this station annotated with a route distance.
    pub fn annotated(&self, distance_km: f64) -> Self {
        Self {
            distance_to_route_km: Some(distance_km),
            ..self.clone()
        }
    }
}
