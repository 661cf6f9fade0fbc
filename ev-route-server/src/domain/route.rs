//! Decoded driving routes.

use super::Coordinate;

/// One driving alternative returned by the directions provider.
///
/// The path is the provider's overview geometry: simplified and lossy, not
/// an exact road centreline.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Total distance over all legs, in kilometres (2 decimal places).
    pub distance_km: f64,

    /// Total duration over all legs, in minutes (1 decimal place).
    pub duration_min: f64,

    /// Overview geometry.
    pub path: Vec<Coordinate>,
}

impl Route {
    /// Build a route from raw leg totals in metres and seconds.
    pub fn from_totals(distance_m: f64, duration_s: f64, path: Vec<Coordinate>) -> Self {
        Self {
            distance_km: round_to(distance_m / 1000.0, 2),
            duration_min: round_to(duration_s / 60.0, 1),
            path,
        }
    }
}

/// Round `value` to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_totals_converts_units() {
        let route = Route::from_totals(123_456.0, 5_430.0, Vec::new());
        assert_eq!(route.distance_km, 123.46);
        assert_eq!(route.duration_min, 90.5);
    }

    #[test]
    fn from_totals_zero() {
        let route = Route::from_totals(0.0, 0.0, Vec::new());
        assert_eq!(route.distance_km, 0.0);
        assert_eq!(route.duration_min, 0.0);
    }

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.235001, 2), 1.24);
        assert_eq!(round_to(59.96, 1), 60.0);
    }
}
