//! Conversion from Directions API responses to domain routes.

use crate::domain::Route;
use crate::geometry::{PolylineError, decode};

use super::types::{DirectionsResponse, DirectionsRoute};

/// Provider status meaning the request succeeded.
const STATUS_OK: &str = "OK";

/// Error converting a directions response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Provider answered but has no usable route.
    #[error("no route found (status {status})")]
    NoRoute {
        status: String,
        message: Option<String>,
    },

    /// An overview polyline could not be decoded.
    #[error("route {index}: {source}")]
    Polyline {
        index: usize,
        #[source]
        source: PolylineError,
    },
}

/// Convert a directions response into routes, fastest first.
///
/// Alternatives without an overview polyline are skipped. Leg distances and
/// durations are summed per route. A route whose polyline fails to decode
/// fails the whole conversion; no partial geometry is returned.
pub fn convert_directions(response: &DirectionsResponse) -> Result<Vec<Route>, ConversionError> {
    if response.status != STATUS_OK {
        return Err(ConversionError::NoRoute {
            status: response.status.clone(),
            message: response.error_message.clone(),
        });
    }

    let mut routes = Vec::with_capacity(response.routes.len());

    for (index, route) in response.routes.iter().enumerate() {
        if route.overview_polyline.points.is_empty() {
            continue;
        }
        routes.push(convert_route(route).map_err(|source| ConversionError::Polyline {
            index,
            source,
        })?);
    }

    if routes.is_empty() {
        return Err(ConversionError::NoRoute {
            status: response.status.clone(),
            message: Some("provider returned no usable routes".to_string()),
        });
    }

    // Providers usually order alternatives already; make sure
    routes.sort_by(|a, b| a.duration_min.total_cmp(&b.duration_min));

    Ok(routes)
}

fn convert_route(route: &DirectionsRoute) -> Result<Route, PolylineError> {
    let path = decode(&route.overview_polyline.points)?;

    let distance_m: f64 = route
        .legs
        .iter()
        .filter_map(|leg| leg.distance.as_ref())
        .map(|d| d.value)
        .sum();
    let duration_s: f64 = route
        .legs
        .iter()
        .filter_map(|leg| leg.duration.as_ref())
        .map(|d| d.value)
        .sum();

    Ok(Route::from_totals(distance_m, duration_s, path))
}
