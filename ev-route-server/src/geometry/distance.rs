//! Great-circle distances.

use crate::domain::Coordinate;

/// Mean Earth radius (IUGG), in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two coordinates, in kilometres.
///
/// Uses the haversine formula on a sphere of mean Earth radius.
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let delta_lat = (b.lat() - a.lat()).to_radians();
    let delta_lng = (b.lng() - a.lng()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);

    // Rounding can push h fractionally above 1 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Approximate distance from `p` to the segment `a`-`b`, in kilometres.
///
/// This is the minimum of the distances from `p` to each endpoint and to the
/// segment's naive midpoint. It is not a projection onto the great-circle
/// arc: for a long segment passing close to `p` away from those three
/// samples it over-estimates, possibly by up to a quarter of the segment
/// length. That is acceptable for overview polylines, whose segments are
/// short, and it costs three haversine evaluations per segment.
pub fn point_segment_distance_km(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    let mid = a.midpoint(b);
    haversine_km(p, a)
        .min(haversine_km(p, b))
        .min(haversine_km(p, &mid))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_coord() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng).unwrap())
    }

    proptest! {
        #[test]
        fn symmetric(a in any_coord(), b in any_coord()) {
            let ab = haversine_km(&a, &b);
            let ba = haversine_km(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-9, "{} != {}", ab, ba);
        }

        #[test]
        fn non_negative_and_bounded(a in any_coord(), b in any_coord()) {
            let d = haversine_km(&a, &b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }

        #[test]
        fn zero_to_self(a in any_coord()) {
            prop_assert_eq!(haversine_km(&a, &a), 0.0);
        }

        #[test]
        fn segment_distance_not_above_endpoints(p in any_coord(), a in any_coord(), b in any_coord()) {
            let d = point_segment_distance_km(&p, &a, &b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= haversine_km(&p, &a));
            prop_assert!(d <= haversine_km(&p, &b));
        }
    }
}
