//! Upstream directions provider.
//!
//! The planner talks to the routing provider through [`DirectionsProvider`],
//! so it can be driven by the real Google client, a recorded response, or a
//! test double.
//!
//! Key characteristics of the provider:
//! - Each call is billed, which is why the planner caches results
//! - Route geometry arrives as an encoded overview polyline, one per
//!   alternative, simplified by the provider
//! - A non-`OK` `status` arrives with HTTP 200, so transport success says
//!   nothing about whether a route was found

mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::future::Future;

pub use client::{DirectionsConfig, GoogleDirectionsClient};
pub use convert::{ConversionError, convert_directions};
pub use error::DirectionsError;
pub use mock::MockDirectionsClient;
pub use types::{
    DirectionsLeg, DirectionsRequest, DirectionsResponse, DirectionsRoute, OverviewPolyline,
    TextValue,
};

/// Source of driving directions.
///
/// This abstraction allows the planner to be tested with mock data.
pub trait DirectionsProvider: Send + Sync {
    /// Request directions. Returns the raw provider response; a non-`OK`
    /// provider status is not an error at this level.
    fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> impl Future<Output = Result<DirectionsResponse, DirectionsError>> + Send;
}

/// The directions backend selected at startup.
#[derive(Clone)]
pub enum DirectionsBackend {
    Google(GoogleDirectionsClient),
    Mock(MockDirectionsClient),
}

impl DirectionsProvider for DirectionsBackend {
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsError> {
        match self {
            DirectionsBackend::Google(client) => client.directions(request).await,
            DirectionsBackend::Mock(client) => client.directions(request).await,
        }
    }
}
