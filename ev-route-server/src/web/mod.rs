//! Web layer for the EV route planner.
//!
//! Provides JSON endpoints for planning routes and finding charging
//! stations along them.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router, status_for};
pub use state::AppState;
