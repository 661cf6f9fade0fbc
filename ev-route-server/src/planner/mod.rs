//! Route planning and station ranking.
//!
//! This module answers: "Which ways can I drive from here to there, and
//! which charging stations lie along them?"
//!
//! Routes come from the directions provider through a short-lived cache;
//! stations are ranked against a route's overview geometry by approximate
//! distance, then by charger power.

mod config;
mod error;
mod plan;
mod rank;


pub use config::PlannerConfig;
pub use error::PlanError;
pub use plan::RoutePlanner;
pub use rank::{stations_near_route, validate_radius};
