//! `Depot` — the context object passed to the planner and the simulator.

use std::path::Path;

use hs_core::{DayClock, PackageId};
use tracing::info;

use crate::{
    load_distances_csv, load_packages_csv, DataError, DataResult, DistanceIndex, PackageRegistry,
    HUB,
};

/// Everything built from the input tables at start-up.
///
/// The planner borrows the whole depot immutably; the simulator takes
/// `&mut depot.packages` so both can be used from the same owner without
/// shared mutable state.
#[derive(Debug, Clone, Default)]
pub struct Depot {
    pub distances: DistanceIndex,
    pub packages:  PackageRegistry,
    pub clock:     DayClock,
}

impl Depot {
    pub fn new(distances: DistanceIndex, packages: PackageRegistry, clock: DayClock) -> Self {
        Self { distances, packages, clock }
    }

    /// Load both CSVs and run the integrity checks.
    pub fn load(distances: &Path, packages: &Path, clock: DayClock) -> DataResult<Self> {
        let depot = Self::new(
            load_distances_csv(distances)?,
            load_packages_csv(packages, &clock)?,
            clock,
        );
        depot.verify()?;
        info!(
            addresses = depot.distances.address_count(),
            packages  = depot.packages.len(),
            "depot ready"
        );
        Ok(depot)
    }

    /// Symmetry check plus "every package address and the hub are indexed".
    pub fn verify(&self) -> DataResult<()> {
        self.distances.verify_symmetry()?;
        if !self.distances.contains_address(HUB) {
            return Err(DataError::AddressNotFound(HUB.to_owned()));
        }
        for package in self.packages.iter() {
            if !self.distances.contains_address(&package.address) {
                return Err(DataError::AddressNotFound(package.address.clone()));
            }
        }
        Ok(())
    }

    pub fn address_of(&self, id: PackageId) -> DataResult<&str> {
        Ok(self.packages.get(id)?.address.as_str())
    }

    /// Distance between the addresses of two packages.
    pub fn distance_between(&self, a: PackageId, b: PackageId) -> DataResult<f64> {
        self.distances.get_distance(self.address_of(a)?, self.address_of(b)?)
    }

    /// Distance from the hub to a package's address.
    pub fn distance_from_hub(&self, id: PackageId) -> DataResult<f64> {
        self.distances.get_distance(HUB, self.address_of(id)?)
    }
}
