//! Front ends over [`crate::planner::PlanHandler`].

pub mod cli;
pub mod page;
pub mod web;

pub use cli::{ProfileArgs, run_once};
pub use web::{WebState, planner_routes, serve};
