//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::{Coordinate, Station};
use crate::geometry::{BoundingBox, decode};
use crate::planner::{PlanError, stations_near_route, validate_radius};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/routes/plan", post(plan_routes))
        .route("/stations/near-route", post(stations_near_route_handler))
        .route("/plan", post(plan_trip))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan driving routes, fastest first.
async fn plan_routes(
    State(state): State<AppState>,
    payload: Result<Json<PlanRoutesRequest>, JsonRejection>,
) -> Result<Json<PlanRoutesResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Routes(rejected_body(e)))?;
    let (start, end, waypoints) = parse_endpoints(&req).map_err(AppError::Routes)?;

    let routes = state
        .planner
        .get_routes(start, end, &waypoints, req.alternatives)
        .await
        .map_err(AppError::Routes)?;

    Ok(Json(PlanRoutesResponse {
        routes: routes.iter().map(RouteResult::from_route).collect(),
        error: None,
    }))
}

/// Rank inventory stations against a caller-supplied path.
async fn stations_near_route_handler(
    State(state): State<AppState>,
    payload: Result<Json<NearRouteRequest>, JsonRejection>,
) -> Result<Json<NearRouteResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Stations(rejected_body(e)))?;
    let radius_km = req
        .radius_km
        .unwrap_or(state.planner.config().default_radius_km);
    validate_radius(radius_km).map_err(AppError::Stations)?;

    let path = match (&req.path, &req.polyline) {
        (Some(pairs), _) => to_path(pairs).map_err(|e| AppError::Stations(e.into()))?,
        (None, Some(encoded)) => decode(encoded).map_err(|e| {
            AppError::Stations(PlanError::InvalidInput(format!("polyline: {e}")))
        })?,
        (None, None) => {
            return Err(AppError::Stations(PlanError::InvalidInput(
                "either path or polyline is required".to_string(),
            )));
        }
    };

    let candidates = candidates_near(&state, &path, radius_km).await;
    let stations = stations_near_route(
        &candidates,
        &path,
        radius_km,
        &state.planner.config().scan,
    )
    .map_err(AppError::Stations)?;

    debug!(
        vertices = path.len(),
        candidates = candidates.len(),
        stations = stations.len(),
        "ranked stations near route"
    );

    Ok(Json(NearRouteResponse {
        stations: stations.iter().map(StationResult::from_station).collect(),
        error: None,
    }))
}

/// Plan routes and rank stations along the fastest one.
async fn plan_trip(
    State(state): State<AppState>,
    payload: Result<Json<PlanTripRequest>, JsonRejection>,
) -> Result<Json<PlanTripResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Trip(rejected_body(e)))?;
    let (start, end, waypoints) = parse_endpoints(&req.route).map_err(AppError::Trip)?;
    if let Some(radius_km) = req.radius_km {
        validate_radius(radius_km).map_err(AppError::Trip)?;
    }

    let routes = state
        .planner
        .get_routes(start, end, &waypoints, req.route.alternatives)
        .await
        .map_err(AppError::Trip)?;

    let stations = match routes.first() {
        None => Vec::new(),
        Some(fastest) => {
            let radius_km = req
                .radius_km
                .unwrap_or(state.planner.config().default_radius_km);
            let candidates = candidates_near(&state, &fastest.path, radius_km).await;

            let ranked = match req.radius_km {
                Some(radius_km) => state
                    .planner
                    .annotate_stations_near_route(fastest, &candidates, radius_km),
                None => state
                    .planner
                    .stations_near_fastest_route(&routes, &candidates),
            };
            ranked.map_err(AppError::Trip)?
        }
    };

    Ok(Json(PlanTripResponse {
        routes: routes.iter().map(RouteResult::from_route).collect(),
        stations: stations.iter().map(StationResult::from_station).collect(),
        error: None,
    }))
}

/// Describe a request body that could not be read as JSON.
fn rejected_body(rejection: JsonRejection) -> PlanError {
    PlanError::InvalidInput(rejection.body_text())
}

/// Parse start, end and waypoints from a routing request.
fn parse_endpoints(
    req: &PlanRoutesRequest,
) -> Result<(Coordinate, Coordinate, Vec<Coordinate>), PlanError> {
    let start = to_coordinate(req.start)?;
    let end = to_coordinate(req.end)?;
    let waypoints = to_path(&req.waypoints)?;
    Ok((start, end, waypoints))
}

/// Inventory stations that could lie within `radius_km` of `path`.
async fn candidates_near(state: &AppState, path: &[Coordinate], radius_km: f64) -> Vec<Station> {
    match BoundingBox::around_path(path, radius_km) {
        Some(bbox) => state.inventory.within(&bbox).await,
        None => Vec::new(),
    }
}

/// Application error type.
///
/// Each variant carries the response shape of the endpoint that failed, so
/// the error body still has the endpoint's (empty) result lists.
#[derive(Debug)]
pub enum AppError {
    Routes(PlanError),
    Stations(PlanError),
    Trip(PlanError),
}

/// HTTP status for a planning error.
pub fn status_for(e: &PlanError) -> StatusCode {
    match e {
        PlanError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        PlanError::NoRouteFound(_) => StatusCode::NOT_FOUND,
        PlanError::UpstreamUnavailable(_) | PlanError::MalformedEncoding(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let e = match &self {
            AppError::Routes(e) | AppError::Stations(e) | AppError::Trip(e) => e,
        };
        let status = status_for(e);
        let error = Some(ErrorBody::from_plan_error(e));

        warn!(%status, error = %e, "request failed");

        match self {
            AppError::Routes(_) => (
                status,
                Json(PlanRoutesResponse {
                    routes: Vec::new(),
                    error,
                }),
            )
                .into_response(),
            AppError::Stations(_) => (
                status,
                Json(NearRouteResponse {
                    stations: Vec::new(),
                    error,
                }),
            )
                .into_response(),
            AppError::Trip(_) => (
                status,
                Json(PlanTripResponse {
                    routes: Vec::new(),
                    stations: Vec::new(),
                    error,
                }),
            )
                .into_response(),
        }
    }
}
