use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ev_route_server::cache::CacheConfig;
use ev_route_server::directions::{
    DirectionsBackend, DirectionsConfig, GoogleDirectionsClient, MockDirectionsClient,
};
use ev_route_server::planner::{PlannerConfig, RoutePlanner};
use ev_route_server::stations::{InventorySource, StationInventory};
use ev_route_server::web::{AppState, create_router};

/// Read an environment variable, falling back to `default` if unset or
/// unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(name, value = %raw, "ignoring unparsable environment variable");
            default
        }),
        Err(_) => default,
    }
}

fn directions_backend() -> Result<DirectionsBackend, Box<dyn std::error::Error>> {
    if let Ok(path) = std::env::var("DIRECTIONS_MOCK_FILE") {
        let mock = MockDirectionsClient::from_file(&path)?;
        info!(%path, "serving recorded directions");
        return Ok(DirectionsBackend::Mock(mock));
    }

    let api_key = std::env::var("GOOGLE_MAPS_API_KEY").unwrap_or_default();
    let mut config = DirectionsConfig::new(api_key);
    if let Ok(url) = std::env::var("DIRECTIONS_BASE_URL") {
        config = config.with_base_url(url);
    }

    Ok(DirectionsBackend::Google(GoogleDirectionsClient::new(config)?))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let backend = directions_backend()?;

    let cache_config = CacheConfig::default()
        .with_ttl(Duration::from_secs(env_or("ROUTE_CACHE_TTL_SECS", 25)))
        .with_max_capacity(env_or("ROUTE_CACHE_MAX_ENTRIES", 256));
    let planner_config = PlannerConfig::default()
        .with_default_radius_km(env_or("STATION_RADIUS_KM", 5.0))
        .with_optimize_waypoints(env_or("OPTIMIZE_WAYPOINTS", false))
        .with_cache(cache_config);
    planner_config.validate()?;
    let planner = RoutePlanner::new(backend, planner_config);

    // Load station inventory (fail fast if unavailable)
    let stations_file: String = env_or("STATIONS_FILE", "data/stations.json".to_string());
    let inventory = StationInventory::load(InventorySource::file(&stations_file))?;
    info!(
        path = %stations_file,
        stations = inventory.len().await,
        "loaded station inventory"
    );

    // Spawn background task to refresh the inventory
    let refresh_every = Duration::from_secs(env_or("STATIONS_REFRESH_SECS", 3600u64).max(1));
    let inventory_refresh = inventory.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_every);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match inventory_refresh.refresh().await {
                Ok(count) => info!(stations = count, "refreshed station inventory"),
                Err(e) => warn!(error = %e, "failed to refresh station inventory"),
            }
        }
    });

    let state = AppState::new(planner, inventory);
    let app = create_router(state);

    let addr: SocketAddr = env_or("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)));
    info!("EV route planner listening on http://{addr}");
    info!("  GET  /health               - Health check");
    info!("  POST /routes/plan          - Plan driving routes");
    info!("  POST /stations/near-route  - Stations near a path");
    info!("  POST /plan                 - Routes plus stations");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
