//! Route geometry: polyline decoding and approximate distances.
//!
//! Everything in this module is pure and synchronous. Functions take
//! immutable inputs and return new values, so they can be called from any
//! number of request tasks without synchronisation.

mod bounds;
mod distance;
mod polyline;
mod route_index;

pub use bounds::BoundingBox;
pub use distance::{EARTH_RADIUS_KM, haversine_km, point_segment_distance_km};
pub use polyline::{PolylineError, decode, encode};
pub use route_index::{RouteIndex, ScanConfig, closest_distance_km};
