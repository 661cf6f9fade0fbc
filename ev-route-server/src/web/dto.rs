//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, InvalidCoordinate, Route, Station};
use crate::planner::PlanError;

/// A coordinate on the wire: `[lat, lng]` in degrees.
pub type LatLng = [f64; 2];

/// Parse a wire coordinate.
pub fn to_coordinate(pair: LatLng) -> Result<Coordinate, InvalidCoordinate> {
    Coordinate::new(pair[0], pair[1])
}

/// Parse a list of wire coordinates, failing on the first invalid one.
pub fn to_path(pairs: &[LatLng]) -> Result<Vec<Coordinate>, InvalidCoordinate> {
    pairs.iter().map(|p| to_coordinate(*p)).collect()
}

fn from_coordinate(c: &Coordinate) -> LatLng {
    [c.lat(), c.lng()]
}

/// Request to plan driving routes.
#[derive(Debug, Deserialize)]
pub struct PlanRoutesRequest {
    pub start: LatLng,
    pub end: LatLng,

    /// Intermediate stops, visited in order
    #[serde(default)]
    pub waypoints: Vec<LatLng>,

    /// Ask for alternative routes (defaults to true)
    #[serde(default = "default_alternatives")]
    pub alternatives: bool,
}

fn default_alternatives() -> bool {
    true
}

/// Request to find stations near a route.
///
/// Give either the decoded `path` or an encoded `polyline`; `path` wins if
/// both are present.
#[derive(Debug, Deserialize)]
pub struct NearRouteRequest {
    #[serde(default, alias = "polylinePoints")]
    pub path: Option<Vec<LatLng>>,

    #[serde(default)]
    pub polyline: Option<String>,

    /// Search radius (km); the server default if omitted
    #[serde(default)]
    pub radius_km: Option<f64>,
}

/// Request to plan routes and rank stations along the fastest one.
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    #[serde(flatten)]
    pub route: PlanRoutesRequest,

    /// Search radius (km); the server default if omitted
    #[serde(default)]
    pub radius_km: Option<f64>,
}

/// A route in responses.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub distance_km: f64,
    pub duration_min: f64,

    /// Overview geometry as `[lat, lng]` pairs
    pub path: Vec<LatLng>,
}

impl RouteResult {
    /// Convert a domain route to a response.
    pub fn from_route(route: &Route) -> Self {
        Self {
            distance_km: route.distance_km,
            duration_min: route.duration_min,
            path: route.path.iter().map(from_coordinate).collect(),
        }
    }
}

/// A station in responses.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub station_id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub max_power_kw: f64,
    pub charger_count: u32,

    /// Approximate distance to the route (km)
    pub distance_to_route_km: Option<f64>,
}

impl StationResult {
    /// Convert a domain station to a response.
    pub fn from_station(station: &Station) -> Self {
        Self {
            station_id: station.id,
            name: station.name.clone(),
            address: station.address.clone(),
            lat: station.location.lat(),
            lon: station.location.lng(),
            max_power_kw: station.max_power_kw,
            charger_count: station.charger_count,
            distance_to_route_km: station.distance_to_route_km,
        }
    }
}

/// Error detail in responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error kind
    pub kind: &'static str,

    /// Human-readable description
    pub message: String,
}

impl ErrorBody {
    /// Describe a planning error.
    pub fn from_plan_error(e: &PlanError) -> Self {
        let kind = match e {
            PlanError::MalformedEncoding(_) => "malformed_encoding",
            PlanError::UpstreamUnavailable(_) => "upstream_unavailable",
            PlanError::NoRouteFound(_) => "no_route_found",
            PlanError::InvalidInput(_) => "invalid_input",
        };
        Self {
            kind,
            message: e.to_string(),
        }
    }
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct PlanRoutesResponse {
    pub routes: Vec<RouteResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct NearRouteResponse {
    pub stations: Vec<StationResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// Response for trip planning.
#[derive(Debug, Serialize)]
pub struct PlanTripResponse {
    pub routes: Vec<RouteResult>,
    pub stations: Vec<StationResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}
