//! Domain error types.
//!
//! These errors represent validation failures when constructing domain
//! values. They are distinct from API/IO errors.

/// Error returned when a latitude/longitude pair is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lng}): {reason}")]
pub struct InvalidCoordinate {
    pub lat: f64,
    pub lng: f64,
    pub reason: &'static str,
}
