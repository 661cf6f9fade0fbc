//! EV route planner server.
//!
//! A web application that answers: "Which ways can I drive from here to
//! there, and which charging stations are close to the route?"

pub mod cache;
pub mod directions;
pub mod domain;
pub mod geometry;
pub mod planner;
pub mod stations;
pub mod web;
