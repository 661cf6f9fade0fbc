//! Bounding boxes around route paths.
//!
//! Used to narrow an inventory down to candidate stations before the more
//! expensive per-segment scan.

use crate::domain::Coordinate;

/// Kilometres per degree of latitude, rounded down so margins err wide.
const KM_PER_DEGREE: f64 = 110.0;

/// An axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Smallest box containing every vertex of `path`, grown by `margin_km`.
    ///
    /// Returns `None` for an empty path. The margin is converted to degrees
    /// conservatively (using the widest latitude of the box), so any point
    /// within `margin_km` of a vertex lies inside the box. Near the poles the
    /// longitude range widens to the full globe. Paths crossing the
    /// antimeridian are not handled and produce a box spanning the globe
    /// the long way round.
    pub fn around_path(path: &[Coordinate], margin_km: f64) -> Option<Self> {
        let first = path.first()?;
        let mut bbox = BoundingBox {
            min_lat: first.lat(),
            max_lat: first.lat(),
            min_lng: first.lng(),
            max_lng: first.lng(),
        };

        for c in &path[1..] {
            bbox.min_lat = bbox.min_lat.min(c.lat());
            bbox.max_lat = bbox.max_lat.max(c.lat());
            bbox.min_lng = bbox.min_lng.min(c.lng());
            bbox.max_lng = bbox.max_lng.max(c.lng());
        }

        let margin_km = margin_km.max(0.0);
        let lat_margin = margin_km / KM_PER_DEGREE;
        bbox.min_lat = (bbox.min_lat - lat_margin).max(-90.0);
        bbox.max_lat = (bbox.max_lat + lat_margin).min(90.0);

        let widest = bbox.min_lat.abs().max(bbox.max_lat.abs()).to_radians();
        let km_per_lng_degree = KM_PER_DEGREE * widest.cos();
        if km_per_lng_degree <= f64::EPSILON {
            bbox.min_lng = -180.0;
            bbox.max_lng = 180.0;
        } else {
            let lng_margin = margin_km / km_per_lng_degree;
            bbox.min_lng = (bbox.min_lng - lng_margin).max(-180.0);
            bbox.max_lng = (bbox.max_lng + lng_margin).min(180.0);
        }

        Some(bbox)
    }

    /// Returns true if `c` lies inside the box (edges inclusive).
    pub fn contains(&self, c: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&c.lat())
            && (self.min_lng..=self.max_lng).contains(&c.lng())
    }
}
