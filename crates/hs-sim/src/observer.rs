//! Simulation observer trait for progress reporting and data collection.

use hs_core::{PackageId, SimTime};
use hs_data::{Carrier, DeliveryStatus};

use crate::{FleetSnapshot, SimulationResult};

/// Callbacks invoked by [`DeliverySimulator::simulate`][crate::DeliverySimulator::simulate]
/// while it walks each truck's route.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: delivery printer
///
/// ```rust,ignore
/// struct DeliveryPrinter;
///
/// impl SimObserver for DeliveryPrinter {
///     fn on_package(&mut self, id: PackageId, status: &DeliveryStatus) {
///         if let Some(at) = status.delivered_at() {
///             println!("package {id} delivered at {at}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// A truck has left the hub at or before "now".
    fn on_departure(&mut self, _batch: &str, _carrier: &Carrier, _at: SimTime) {}

    /// A package's status has been derived and written to the registry.
    fn on_package(&mut self, _id: PackageId, _status: &DeliveryStatus) {}

    /// One truck's route has been evaluated (whether or not it is back).
    fn on_route_end(&mut self, _result: &SimulationResult) {}

    /// Called once after every truck has been evaluated.
    fn on_sim_end(&mut self, _snapshot: &FleetSnapshot) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `simulate`
/// but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
