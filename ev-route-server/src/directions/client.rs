//! Google Directions HTTP client.
//!
//! Provides an async method for querying the Directions JSON API. Owns a
//! pooled `reqwest` client with tight deadlines so a stalled upstream never
//! blocks a request indefinitely.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use super::DirectionsProvider;
use super::error::DirectionsError;
use super::types::{DirectionsRequest, DirectionsResponse};

/// Default base URL for the Directions API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Default maximum concurrent upstream requests.
const DEFAULT_MAX_CONCURRENT: usize = 100;

/// Default idle connections kept per host.
const DEFAULT_POOL_IDLE: usize = 50;

/// Configuration for the directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Endpoint URL (defaults to production Google)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Idle pooled connections kept per host
    pub pool_idle_per_host: usize,
    /// TCP connect deadline
    pub connect_timeout: Duration,
    /// Whole-request deadline
    pub timeout: Duration,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            pool_idle_per_host: DEFAULT_POOL_IDLE,
            connect_timeout: Duration::from_secs(3),
            timeout: Duration::from_secs(7),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set connect and total request deadlines.
    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }
}

/// Google Directions API client.
///
/// Cheap to clone; clones share the connection pool and the concurrency
/// limit.
#[derive(Debug, Clone)]
pub struct GoogleDirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl GoogleDirectionsClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails if the API key is empty.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        if config.api_key.trim().is_empty() {
            return Err(DirectionsError::NotConfigured(
                "GOOGLE_MAPS_API_KEY is not set".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Fetch directions for a request.
    ///
    /// Returns the parsed response whatever its provider `status`; interpreting
    /// the status is left to the caller.
    pub async fn get_directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| DirectionsError::NotConfigured("semaphore closed".to_string()))?;

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            waypoints = request.waypoints.len(),
            "requesting directions"
        );

        let response = self
            .http
            .get(&self.base_url)
            .query(&request.query_params())
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl DirectionsProvider for GoogleDirectionsClient {
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsError> {
        self.get_directions(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = DirectionsConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeouts(Duration::from_secs(1), Duration::from_secs(2));

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn config_defaults() {
        let config = DirectionsConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.pool_idle_per_host, DEFAULT_POOL_IDLE);
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.timeout, Duration::from_secs(7));
    }

    #[test]
    fn client_creation() {
        let client = GoogleDirectionsClient::new(DirectionsConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[test]
    fn empty_api_key_rejected() {
        let err = GoogleDirectionsClient::new(DirectionsConfig::new("  ")).unwrap_err();
        assert!(matches!(err, DirectionsError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let config = DirectionsConfig::new("test-key")
            .with_base_url("http://127.0.0.1:9/directions")
            .with_timeouts(Duration::from_millis(200), Duration::from_millis(500));
        let client = GoogleDirectionsClient::new(config).unwrap();

        let request = DirectionsRequest {
            origin: crate::domain::Coordinate::new(0.0, 0.0).unwrap(),
            destination: crate::domain::Coordinate::new(1.0, 1.0).unwrap(),
            waypoints: Vec::new(),
            alternatives: true,
            optimize_waypoints: false,
        };

        let result = client.get_directions(&request).await;
        assert!(matches!(
            result,
            Err(DirectionsError::Http(_) | DirectionsError::Timeout)
        ));
    }
}
