//! Directions API request and response types.
//!
//! Response types mirror the Google Directions JSON format. Only the fields
//! the planner consumes are modelled; everything else is ignored. Fields
//! default when absent so that a sparse response still deserialises.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;

/// Parameters for one directions lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,

    /// Intermediate stops, visited in order.
    pub waypoints: Vec<Coordinate>,

    /// Ask the provider for alternative routes.
    pub alternatives: bool,

    /// Let the provider reorder waypoints.
    pub optimize_waypoints: bool,
}

impl DirectionsRequest {
    /// Query parameters for the request, excluding credentials.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("origin", self.origin.to_string()),
            ("destination", self.destination.to_string()),
            ("mode", "driving".to_string()),
            ("alternatives", self.alternatives.to_string()),
        ];

        if !self.waypoints.is_empty() {
            let joined = self
                .waypoints
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join("|");
            let value = if self.optimize_waypoints {
                format!("optimize:true|{joined}")
            } else {
                joined
            };
            params.push(("waypoints", value));
        }

        params
    }
}

/// Top-level directions response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectionsResponse {
    /// Provider status, `"OK"` on success.
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,

    /// Human-readable detail for non-OK statuses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// One route alternative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub overview_polyline: OverviewPolyline,

    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Encoded overview geometry of a route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverviewPolyline {
    #[serde(default)]
    pub points: String,
}

/// One leg between consecutive stops.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectionsLeg {
    #[serde(default)]
    pub distance: Option<TextValue>,

    #[serde(default)]
    pub duration: Option<TextValue>,
}

/// A measured quantity: `value` in SI units (metres or seconds).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextValue {
    #[serde(default)]
    pub value: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
