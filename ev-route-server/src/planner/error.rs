//! Planning error taxonomy.

use crate::directions::{ConversionError, DirectionsError};
use crate::domain::InvalidCoordinate;
use crate::geometry::PolylineError;

/// Error from route planning or station ranking.
///
/// `Clone` so that one failed upstream fetch can be handed to every caller
/// that was waiting on it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// The provider returned geometry that could not be decoded
    #[error("malformed route geometry: {0}")]
    MalformedEncoding(String),

    /// Network failure, timeout, or error response from the provider
    #[error("directions provider unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Provider answered but found no route
    #[error("no route found: {0}")]
    NoRouteFound(String),

    /// Caller supplied an invalid argument
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<DirectionsError> for PlanError {
    fn from(e: DirectionsError) -> Self {
        PlanError::UpstreamUnavailable(e.to_string())
    }
}

impl From<ConversionError> for PlanError {
    fn from(e: ConversionError) -> Self {
        match e {
            ConversionError::NoRoute { status, message } => PlanError::NoRouteFound(match message {
                Some(message) => format!("{status}: {message}"),
                None => status,
            }),
            polyline @ ConversionError::Polyline { .. } => {
                PlanError::MalformedEncoding(polyline.to_string())
            }
        }
    }
}

impl From<PolylineError> for PlanError {
    fn from(e: PolylineError) -> Self {
        PlanError::MalformedEncoding(e.to_string())
    }
}

impl From<InvalidCoordinate> for PlanError {
    fn from(e: InvalidCoordinate) -> Self {
        PlanError::InvalidInput(e.to_string())
    }
}
