//! Fleet configuration: truck speed, driver count, and batch definitions.
//!
//! Batches are plain data so the same simulator runs any assignment of
//! packages to trucks.  A typical `fleet.json`:
//!
//! ```json
//! {
//!   "speed_mph": 18.0,
//!   "drivers": 2,
//!   "batches": [
//!     { "name": "Truck 1", "packages": [1, 13, 14], "departure": { "at": 0.0 } },
//!     { "name": "Truck 2", "packages": [3, 6, 25],  "departure": "when_available" },
//!     { "name": "Truck 3", "packages": [2, 4, 5],   "departure": "after_return" }
//!   ]
//! }
//! ```

use hs_core::{AssociativeTable, PackageId, SimTime};
use hs_data::{DataError, PackageRegistry};
use serde::{Deserialize, Serialize};

use crate::{SimError, SimResult};

/// When a batch's truck leaves the hub.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeparturePolicy {
    /// A fixed time, in hours since day start.
    At(SimTime),
    /// Once the last package of the batch has arrived at the hub.
    WhenAvailable,
    /// Once a driver is free: a spare driver, or one whose truck is back.
    AfterReturn,
}

impl DeparturePolicy {
    /// `true` for batches that claim a driver from the start of the day.
    #[inline]
    pub fn is_first_wave(self) -> bool {
        !matches!(self, DeparturePolicy::AfterReturn)
    }
}

/// One truck load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSpec {
    /// Truck label, used as the carrier name in package statuses.
    pub name:      String,
    pub packages:  Vec<PackageId>,
    pub departure: DeparturePolicy,
}

impl BatchSpec {
    pub fn new(name: impl Into<String>, packages: Vec<PackageId>, departure: DeparturePolicy) -> Self {
        Self { name: name.into(), packages, departure }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Constant truck speed in miles per hour.
    pub speed_mph: f64,
    /// Physical drivers; fewer drivers than batches forces a handoff.
    pub drivers:   usize,
    pub batches:   Vec<BatchSpec>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self { speed_mph: 18.0, drivers: 2, batches: Vec::new() }
    }
}

impl FleetConfig {
    pub fn with_batch(mut self, batch: BatchSpec) -> Self {
        self.batches.push(batch);
        self
    }

    /// Number of batches that claim a driver at day start.
    pub fn first_wave(&self) -> usize {
        self.batches.iter().filter(|b| b.departure.is_first_wave()).count()
    }

    /// Check the configuration against the loaded packages.
    pub fn validate(&self, packages: &PackageRegistry) -> SimResult<()> {
        if !(self.speed_mph.is_finite() && self.speed_mph > 0.0) {
            return Err(SimError::Config(format!(
                "speed must be a positive number of mph, got {}",
                self.speed_mph
            )));
        }
        if self.drivers == 0 {
            return Err(SimError::Config("at least one driver is required".into()));
        }
        let needed = self.first_wave();
        if needed > self.drivers {
            return Err(SimError::NotEnoughDrivers { drivers: self.drivers, needed });
        }

        let mut names: AssociativeTable<&str, ()> = AssociativeTable::new();
        let mut owner: AssociativeTable<PackageId, &str> = AssociativeTable::new();
        for batch in &self.batches {
            if names.put(batch.name.as_str(), ()).is_some() {
                return Err(SimError::DuplicateBatch(batch.name.clone()));
            }
            if let DeparturePolicy::At(t) = batch.departure {
                if !(t.hours().is_finite() && t.hours() >= 0.0) {
                    return Err(SimError::Config(format!(
                        "{:?} departs at an invalid time {}",
                        batch.name,
                        t.hours()
                    )));
                }
            }
            for &id in &batch.packages {
                if !packages.contains(id) {
                    return Err(DataError::PackageNotFound(id).into());
                }
                if let Some(first) = owner.put(id, batch.name.as_str()) {
                    return Err(SimError::DuplicateAssignment {
                        package: id,
                        first:   first.to_owned(),
                        second:  batch.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
