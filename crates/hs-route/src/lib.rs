//! `hs-route` — turning a batch of packages into an ordered delivery route.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`route`]   | `Route` (stop order + per-leg miles)                        |
//! | [`planner`] | `RoutePlanner` trait, `GreedyPlanner`                       |
//! | [`error`]   | `RouteError`, `RouteResult<T>`                              |
//!
//! # Pluggability
//!
//! `hs-sim` calls planning through the [`RoutePlanner`] trait, so a
//! different heuristic can be dropped in without touching the simulator.

pub mod error;
pub mod planner;
pub mod route;


pub use error::{RouteError, RouteResult};
pub use planner::{GreedyPlanner, RoutePlanner};
pub use route::Route;
