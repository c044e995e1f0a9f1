//! Fluent builder for constructing a [`DeliverySimulator`].

use hs_data::PackageRegistry;
use hs_route::{GreedyPlanner, RoutePlanner};

use crate::{BatchSpec, DeliverySimulator, FleetConfig, SimResult};

/// Fluent builder for [`DeliverySimulator<P>`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                        |
/// |-------------------|--------------------------------|
/// | `.speed_mph(v)`   | 18 mph                         |
/// | `.drivers(n)`     | 2                              |
/// | `.batch(b)`       | no batches                     |
/// | `.planner(p)`     | `GreedyPlanner::new()`         |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::from_config(config)
///     .planner(GreedyPlanner::hold_within(0.5))
///     .build(&depot.packages)?;
/// let snapshot = sim.run(&mut depot, SimTime::from_hours(2.0), &mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: RoutePlanner = GreedyPlanner> {
    config:  FleetConfig,
    planner: P,
}

impl SimBuilder<GreedyPlanner> {
    /// Default fleet, no batches, greedy planner.
    pub fn new() -> Self {
        Self::from_config(FleetConfig::default())
    }

    pub fn from_config(config: FleetConfig) -> Self {
        Self { config, planner: GreedyPlanner::new() }
    }
}

impl Default for SimBuilder<GreedyPlanner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: RoutePlanner> SimBuilder<P> {
    pub fn speed_mph(mut self, mph: f64) -> Self {
        self.config.speed_mph = mph;
        self
    }

    pub fn drivers(mut self, drivers: usize) -> Self {
        self.config.drivers = drivers;
        self
    }

    pub fn batch(mut self, batch: BatchSpec) -> Self {
        self.config.batches.push(batch);
        self
    }

    /// Swap the route planner.
    pub fn planner<Q: RoutePlanner>(self, planner: Q) -> SimBuilder<Q> {
        SimBuilder { config: self.config, planner }
    }

    /// Validate the configuration against `packages` and return a ready
    /// [`DeliverySimulator`].
    pub fn build(self, packages: &PackageRegistry) -> SimResult<DeliverySimulator<P>> {
        self.config.validate(packages)?;
        Ok(DeliverySimulator { config: self.config, planner: self.planner })
    }
}
