//! Station ranking against a route.
//!
//! Keeps the stations close enough to a route path to be worth a detour and
//! orders them so the most convenient come first.

use std::cmp::Ordering;

use crate::domain::{Coordinate, Station, round_to};
use crate::geometry::{RouteIndex, ScanConfig};

use super::error::PlanError;

/// Stations within `radius_km` of `path`, nearest first.
///
/// Each kept station is a copy annotated with its approximate distance to
/// the route, rounded to 2 decimal places; the input is not modified.
/// Stations are ranked by:
/// 1. Distance to route (closer is better)
/// 2. Maximum charger power (higher is better)
///
/// Equal stations keep their inventory order. An empty path or station list
/// yields an empty result. Fails with [`PlanError::InvalidInput`] if the
/// radius is negative or not finite.
pub fn stations_near_route(
    stations: &[Station],
    path: &[Coordinate],
    radius_km: f64,
    scan: &ScanConfig,
) -> Result<Vec<Station>, PlanError> {
    validate_radius(radius_km)?;

    let index = RouteIndex::new(path, scan);
    let mut near: Vec<Station> = stations
        .iter()
        .filter_map(|station| {
            let d = index.closest_distance_km(&station.location);
            let rounded = round_to(d, 2);
            // Rounding up could carry a station just inside the radius past it
            (d <= radius_km && rounded <= radius_km).then(|| station.annotated(rounded))
        })
        .collect();

    near.sort_by(compare_ranked);

    Ok(near)
}

/// Check that a search radius is usable.
pub fn validate_radius(radius_km: f64) -> Result<(), PlanError> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(PlanError::InvalidInput(format!(
            "radius must be a non-negative number of kilometres, got {radius_km}"
        )));
    }
    Ok(())
}

fn compare_ranked(a: &Station, b: &Station) -> Ordering {
    // Primary: distance to route
    let da = a.distance_to_route_km.unwrap_or(f64::INFINITY);
    let db = b.distance_to_route_km.unwrap_or(f64::INFINITY);
    let dist_cmp = da.total_cmp(&db);
    if dist_cmp != Ordering::Equal {
        return dist_cmp;
    }

    // Secondary: more powerful chargers
    b.max_power_kw.total_cmp(&a.max_power_kw)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn stations_strategy() -> impl Strategy<Value = Vec<Station>> {
        prop::collection::vec((-1.0f64..1.0, -1.0f64..2.0, 0.0f64..350.0), 0..40).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (lat, lng, power))| {
                        Station::new(i as i64, Coordinate::new(lat, lng).unwrap())
                            .with_chargers(power, 1)
                    })
                    .collect()
            },
        )
    }

    fn path_strategy() -> impl Strategy<Value = Vec<Coordinate>> {
        prop::collection::vec((-0.5f64..0.5, -0.5f64..1.5), 0..20).prop_map(|points| {
            points
                .into_iter()
                .map(|(lat, lng)| Coordinate::new(lat, lng).unwrap())
                .collect()
        })
    }

    proptest! {
        /// No returned station is annotated beyond the radius
        #[test]
        fn never_exceeds_radius(
            stations in stations_strategy(),
            path in path_strategy(),
            radius in 0.0f64..100.0,
        ) {
            let ranked = stations_near_route(&stations, &path, radius, &ScanConfig::default()).unwrap();
            for s in &ranked {
                let d = s.distance_to_route_km.unwrap();
                prop_assert!(d <= radius, "{} > {}", d, radius);
                prop_assert!(d >= 0.0);
            }
        }

        /// Result is ordered by distance, then descending power
        #[test]
        fn result_is_ordered(
            stations in stations_strategy(),
            path in path_strategy(),
            radius in 0.0f64..100.0,
        ) {
            let ranked = stations_near_route(&stations, &path, radius, &ScanConfig::default()).unwrap();
            for pair in ranked.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let (da, db) = (a.distance_to_route_km.unwrap(), b.distance_to_route_km.unwrap());
                prop_assert!(da <= db);
                if da == db {
                    prop_assert!(a.max_power_kw >= b.max_power_kw);
                }
            }
        }

        /// Result is a subset of the input
        #[test]
        fn subset(
            stations in stations_strategy(),
            path in path_strategy(),
            radius in 0.0f64..100.0,
        ) {
            let ranked = stations_near_route(&stations, &path, radius, &ScanConfig::default()).unwrap();
            prop_assert!(ranked.len() <= stations.len());
            for s in &ranked {
                prop_assert!(stations.iter().any(|orig| orig.id == s.id && orig.location == s.location));
            }
        }
    }
}
