//! Planner configuration.

use crate::cache::CacheConfig;
use crate::geometry::ScanConfig;

use super::error::PlanError;
use super::rank::validate_radius;

/// Configuration parameters for route planning and station ranking.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Radius used when a caller does not supply one (km).
    pub default_radius_km: f64,

    /// Let the provider reorder waypoints.
    pub optimize_waypoints: bool,

    /// Directions cache settings.
    pub cache: CacheConfig,

    /// Path scanning settings for the station ranker.
    pub scan: ScanConfig,
}

impl PlannerConfig {
    /// Set the default station radius.
    pub fn with_default_radius_km(mut self, km: f64) -> Self {
        self.default_radius_km = km;
        self
    }

    /// Enable or disable waypoint optimisation.
    pub fn with_optimize_waypoints(mut self, optimize: bool) -> Self {
        self.optimize_waypoints = optimize;
        self
    }

    /// Set the cache configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Set the scan configuration.
    pub fn with_scan(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    /// Check the configuration before serving with it.
    pub fn validate(&self) -> Result<(), PlanError> {
        validate_radius(self.default_radius_km)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_radius_km: 5.0,
            optimize_waypoints: false,
            cache: CacheConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.default_radius_km, 5.0);
        assert!(!config.optimize_waypoints);
        assert_eq!(config.cache.ttl, Duration::from_secs(25));
        assert_eq!(config.scan.stride_threshold, 300);
        assert_eq!(config.scan.stride, 3);
        assert_eq!(config.scan.early_exit_km, 0.15);
    }

    #[test]
    fn validate_rejects_bad_default_radius() {
        assert!(PlannerConfig::default().validate().is_ok());
        assert!(PlannerConfig::default().with_default_radius_km(0.0).validate().is_ok());

        for radius in [-1.0, f64::NAN, f64::INFINITY] {
            let err = PlannerConfig::default()
                .with_default_radius_km(radius)
                .validate()
                .unwrap_err();
            assert!(matches!(err, PlanError::InvalidInput(_)), "radius {radius}");
        }
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::default()
            .with_default_radius_km(2.5)
            .with_optimize_waypoints(true)
            .with_cache(CacheConfig::default().with_ttl(Duration::from_secs(1)))
            .with_scan(ScanConfig::default().with_early_exit_km(0.05));

        assert_eq!(config.default_radius_km, 2.5);
        assert!(config.optimize_waypoints);
        assert_eq!(config.cache.ttl, Duration::from_secs(1));
        assert_eq!(config.scan.early_exit_km, 0.05);
    }
}
