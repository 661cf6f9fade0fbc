//! Route planning: cached directions lookups and station annotation.

use tracing::{debug, info};

use crate::cache::{DirectionsCache, DirectionsKey, RouteEntry};
use crate::directions::{DirectionsProvider, DirectionsRequest, convert_directions};
use crate::domain::{Coordinate, Route, Station};

use super::config::PlannerConfig;
use super::error::PlanError;
use super::rank::stations_near_route;

/// Plans driving routes and finds charging stations along them.
///
/// Owns the directions cache, so one planner should be shared by every
/// request handler.
pub struct RoutePlanner<D: DirectionsProvider> {
    directions: D,
    cache: DirectionsCache,
    config: PlannerConfig,
}

impl<D: DirectionsProvider> RoutePlanner<D> {
    /// Create a new planner.
    pub fn new(directions: D, config: PlannerConfig) -> Self {
        Self {
            directions,
            cache: DirectionsCache::new(&config.cache),
            config,
        }
    }

    /// Driving routes from `start` to `end` via `waypoints`, fastest first.
    ///
    /// Answers from the cache while an identical request is unexpired.
    /// Concurrent identical requests share one upstream fetch. Failures are
    /// returned to every waiting caller and never cached.
    pub async fn get_routes(
        &self,
        start: Coordinate,
        end: Coordinate,
        waypoints: &[Coordinate],
        alternatives: bool,
    ) -> Result<RouteEntry, PlanError> {
        let key = DirectionsKey::new(start, end, waypoints, alternatives);

        let request = DirectionsRequest {
            origin: start,
            destination: end,
            waypoints: waypoints.to_vec(),
            alternatives,
            optimize_waypoints: self.config.optimize_waypoints,
        };

        self.cache
            .get_or_fetch(key, self.fetch_routes(request))
            .await
            .map_err(|e| (*e).clone())
    }

    async fn fetch_routes(&self, request: DirectionsRequest) -> Result<RouteEntry, PlanError> {
        debug!(
            origin = %request.origin,
            destination = %request.destination,
            waypoints = request.waypoints.len(),
            "directions cache miss"
        );

        let response = self.directions.directions(&request).await?;
        let routes = convert_directions(&response)?;

        info!(
            origin = %request.origin,
            destination = %request.destination,
            routes = routes.len(),
            fastest_min = routes.first().map(|r| r.duration_min).unwrap_or_default(),
            "fetched directions"
        );

        Ok(RouteEntry::new(routes))
    }

    /// Stations within `radius_km` of `route`, nearest first.
    pub fn annotate_stations_near_route(
        &self,
        route: &Route,
        stations: &[Station],
        radius_km: f64,
    ) -> Result<Vec<Station>, PlanError> {
        stations_near_route(stations, &route.path, radius_km, &self.config.scan)
    }

    /// Stations near the fastest of `routes`, within the default radius.
    ///
    /// `routes` must be ordered fastest first, as returned by
    /// [`get_routes`](Self::get_routes). Empty if there are no routes.
    pub fn stations_near_fastest_route(
        &self,
        routes: &[Route],
        stations: &[Station],
    ) -> Result<Vec<Station>, PlanError> {
        match routes.first() {
            Some(fastest) => {
                self.annotate_stations_near_route(fastest, stations, self.config.default_radius_km)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Get the planner configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Get the directions cache.
    pub fn cache(&self) -> &DirectionsCache {
        &self.cache
    }

    /// Get the directions provider.
    pub fn directions(&self) -> &D {
        &self.directions
    }
}
