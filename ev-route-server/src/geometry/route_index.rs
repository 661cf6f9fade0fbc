//! Point-to-path proximity.
//!
//! Finds the approximate minimum distance from a point to a route path by
//! scanning its segments with [`point_segment_distance_km`]. Long paths are
//! sampled at a stride, and the scan stops as soon as a segment is "close
//! enough", so cost stays near-linear in path length and usually well below.

use crate::domain::Coordinate;

use super::distance::point_segment_distance_km;

/// Tuning parameters for scanning a path.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Paths with more vertices than this are scanned at `stride`.
    pub stride_threshold: usize,

    /// Segment step used for long paths.
    pub stride: usize,

    /// Stop scanning once the best distance drops below this (km).
    pub early_exit_km: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            stride_threshold: 300,
            stride: 3,
            early_exit_km: 0.15,
        }
    }
}

impl ScanConfig {
    /// Set the early-exit threshold.
    pub fn with_early_exit_km(mut self, km: f64) -> Self {
        self.early_exit_km = km;
        self
    }

    /// Set the stride and the path length above which it applies.
    pub fn with_stride(mut self, threshold: usize, stride: usize) -> Self {
        self.stride_threshold = threshold;
        self.stride = stride;
        self
    }

    /// Segment step for a path with `vertices` points.
    fn step_for(&self, vertices: usize) -> usize {
        if vertices > self.stride_threshold {
            self.stride.max(1)
        } else {
            1
        }
    }
}

/// A route path prepared for repeated proximity queries.
#[derive(Debug, Clone, Copy)]
pub struct RouteIndex<'a> {
    path: &'a [Coordinate],
    step: usize,
    early_exit_km: f64,
}

impl<'a> RouteIndex<'a> {
    /// Index a path using the given scan parameters.
    pub fn new(path: &'a [Coordinate], config: &ScanConfig) -> Self {
        Self {
            path,
            step: config.step_for(path.len()),
            early_exit_km: config.early_exit_km,
        }
    }

    /// Approximate minimum distance from `point` to the path, in kilometres.
    ///
    /// Returns `f64::INFINITY` for paths with fewer than two vertices.
    /// Segments are visited in path order from the first one; with a stride
    /// the skipped segments are never examined, so a closer unsampled segment
    /// can be missed.
    pub fn closest_distance_km(&self, point: &Coordinate) -> f64 {
        let mut best = f64::INFINITY;

        if self.path.len() < 2 {
            return best;
        }

        for i in (0..self.path.len() - 1).step_by(self.step) {
            let d = point_segment_distance_km(point, &self.path[i], &self.path[i + 1]);
            if d < best {
                best = d;
                if best < self.early_exit_km {
                    break;
                }
            }
        }

        best
    }

    /// Number of vertices in the indexed path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Returns true if the path has no vertices.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Approximate minimum distance from `point` to `path` with default scanning.
pub fn closest_distance_km(point: &Coordinate, path: &[Coordinate]) -> f64 {
    RouteIndex::new(path, &ScanConfig::default()).closest_distance_km(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::haversine_km;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    /// A path along the equator with `n` vertices spaced 0.01 degrees apart.
    fn equator_path(n: usize) -> Vec<Coordinate> {
        (0..n).map(|i| coord(0.0, i as f64 * 0.01)).collect()
    }

    #[test]
    fn short_paths_are_infinitely_far() {
        let p = coord(0.0, 0.0);
        assert_eq!(closest_distance_km(&p, &[]), f64::INFINITY);
        assert_eq!(closest_distance_km(&p, &[coord(0.0, 0.0)]), f64::INFINITY);
    }

    #[test]
    fn station_on_segment_midpoint() {
        let path = vec![coord(0.0, 0.0), coord(0.0, 1.0)];
        let d = closest_distance_km(&coord(0.0, 0.5), &path);
        assert!(d < 1e-9, "got {d}");
        assert!(d <= 5.0);
    }

    #[test]
    fn finds_minimum_over_segments() {
        let path = vec![coord(0.0, 0.0), coord(0.0, 1.0), coord(1.0, 1.0)];
        let p = coord(0.5, 1.1);
        let d = closest_distance_km(&p, &path);
        let expected = haversine_km(&p, &coord(0.5, 1.0));
        assert!((d - expected).abs() < 1e-9, "got {d}, expected {expected}");
    }

    #[test]
    fn early_exit_stops_at_first_close_segment() {
        // Point sits 0.1 km from the first vertex and exactly on a later one.
        let path = vec![coord(0.0, 0.0), coord(0.0, 0.5), coord(0.0, 1.0), coord(0.0, 2.0)];
        let p = coord(0.0009, 0.0);
        let d = closest_distance_km(&p, &path);
        assert!(d > 0.0 && d < 0.15, "got {d}");

        // Without early exit the exact hit on the later vertex is found
        let exhaustive = ScanConfig::default().with_early_exit_km(0.0);
        let on_path = coord(0.0, 2.0);
        let d = RouteIndex::new(&path, &exhaustive).closest_distance_km(&on_path);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn long_paths_use_stride() {
        let path = equator_path(301);
        let index = RouteIndex::new(&path, &ScanConfig::default());
        assert_eq!(index.step, 3);

        let path = equator_path(300);
        let index = RouteIndex::new(&path, &ScanConfig::default());
        assert_eq!(index.step, 1);
    }

    #[test]
    fn stride_can_miss_unsampled_segment() {
        // 301 vertices → stride 3; segments 0, 3, 6, ... are examined.
        // A point right next to vertex 2 is only near segments 1 and 2.
        let path = equator_path(301);
        let p = coord(0.05, path[2].lng());
        let config = ScanConfig::default().with_early_exit_km(0.0);

        let strided = RouteIndex::new(&path, &config).closest_distance_km(&p);
        let exhaustive = RouteIndex::new(&path, &config.clone().with_stride(10_000, 3))
            .closest_distance_km(&p);

        assert!(exhaustive < strided, "{exhaustive} !< {strided}");
    }

    #[test]
    fn zero_stride_is_treated_as_one() {
        let path = equator_path(10);
        let config = ScanConfig::default().with_stride(2, 0);
        let index = RouteIndex::new(&path, &config);
        assert_eq!(index.step, 1);
    }

    #[test]
    fn len_and_is_empty() {
        let path = equator_path(4);
        let index = RouteIndex::new(&path, &ScanConfig::default());
        assert_eq!(index.len(), 4);
        assert!(!index.is_empty());
        assert!(RouteIndex::new(&[], &ScanConfig::default()).is_empty());
    }
}
