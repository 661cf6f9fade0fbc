//! Directions client error types.

/// Errors from the directions HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed (network error, connection refused, etc.)
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Request exceeded the connect or total deadline
    #[error("request timed out")]
    Timeout,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Client or mock data could not be set up
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for DirectionsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DirectionsError::Timeout
        } else {
            DirectionsError::Http(err)
        }
    }
}
