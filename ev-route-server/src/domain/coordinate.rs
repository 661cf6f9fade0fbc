//! Geographic coordinate type.

use std::fmt;

use super::error::InvalidCoordinate;

/// A WGS-84 latitude/longitude pair in decimal degrees.
///
/// Latitude is always within `[-90, 90]` and longitude within `[-180, 180]`;
/// this type guarantees that any `Coordinate` value is valid by construction.
///
/// # Examples
///
/// ```
/// use ev_route_server::domain::Coordinate;
///
/// let sf = Coordinate::new(37.7749, -122.4194).unwrap();
/// assert_eq!(sf.lat(), 37.7749);
///
/// // Out of range is rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Create a coordinate, validating both components.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinate {
                lat,
                lng,
                reason: "components must be finite",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                lat,
                lng,
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinate {
                lat,
                lng,
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self { lat, lng })
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Naive component-wise midpoint.
    ///
    /// Adequate for the short segments of an overview polyline. Wrong for
    /// segments that cross the antimeridian, where the average longitude
    /// lands on the opposite side of the globe.
    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate {
            lat: (self.lat + other.lat) / 2.0,
            lng: (self.lng + other.lng) / 2.0,
        }
    }

    /// Bit patterns of both components, for exact hashing and equality.
    pub(crate) fn to_bits(self) -> (u64, u64) {
        (self.lat.to_bits(), self.lng.to_bits())
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
