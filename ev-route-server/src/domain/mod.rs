//! Domain types for the EV route planner.
//!
//! This module contains the core value types shared by the geometry,
//! planning and web layers. Coordinates enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod coordinate;
mod error;
mod route;
mod station;

pub use coordinate::Coordinate;
pub use error::InvalidCoordinate;
pub use route::Route;
pub(crate) use route::round_to;
pub use station::Station;
