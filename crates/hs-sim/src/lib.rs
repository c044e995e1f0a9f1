//! `hs-sim` — time-driven delivery status and driver handoff.
//!
//! # One simulate call
//!
//! ```text
//! plan:      each batch → RoutePlanner::plan → Route, batch availability
//! simulate(now):
//!   ① First wave  — At(t) / WhenAvailable batches depart with their own
//!                   driver; traveled = clamp(speed·(now − dep), 0, length).
//!   ② Pool        — drivers whose truck is back by now, plus spare drivers.
//!   ③ Handoff     — AfterReturn batches, in order, take the earliest-free
//!                   driver; departure = max(availability, driver free time).
//!   ④ Status      — every stop with cumulative miles ≤ traveled is
//!                   Delivered, the rest InTransit (or AtHub before departure).
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`config`]   | `FleetConfig`, `BatchSpec`, `DeparturePolicy`             |
//! | [`sim`]      | `DeliverySimulator`, `PlannedBatch`                       |
//! | [`result`]   | `SimulationResult`, `RouteState`, `FleetSnapshot`         |
//! | [`builder`]  | `SimBuilder`                                              |
//! | [`observer`] | `SimObserver`, `NoopObserver`                             |
//! | [`error`]    | `SimError`, `SimResult<T>`                                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hs_core::SimTime;
//! use hs_sim::{NoopObserver, SimBuilder};
//!
//! let sim = SimBuilder::from_config(config).build(&depot.packages)?;
//! let snapshot = sim.run(&mut depot, SimTime::from_hours(1.5), &mut NoopObserver)?;
//! println!("{}/{} delivered", snapshot.delivered, snapshot.total);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod result;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::{BatchSpec, DeparturePolicy, FleetConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use result::{FleetSnapshot, RouteState, SimulationResult};
pub use sim::{DeliverySimulator, PlannedBatch};
