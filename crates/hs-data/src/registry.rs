//! `PackageRegistry` — package id → `Package`.

use hs_core::{AssociativeTable, PackageId};

use crate::{DataError, DataResult, DeliveryStatus, Package};

/// All packages of the day, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
    table: AssociativeTable<PackageId, Package>,
}

impl PackageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, rejecting repeated ids.
    pub fn from_packages<I>(packages: I) -> DataResult<Self>
    where
        I: IntoIterator<Item = Package>,
    {
        let mut registry = Self::new();
        for package in packages {
            let id = package.id;
            if registry.insert(package).is_some() {
                return Err(DataError::DuplicatePackage(id));
            }
        }
        Ok(registry)
    }

    /// Insert or replace a package.  Returns the replaced record, if any.
    pub fn insert(&mut self, package: Package) -> Option<Package> {
        self.table.put(package.id, package)
    }

    pub fn get(&self, id: PackageId) -> DataResult<&Package> {
        self.table.get(&id).map_err(|_| DataError::PackageNotFound(id))
    }

    pub fn get_mut(&mut self, id: PackageId) -> DataResult<&mut Package> {
        self.table.get_mut(&id).map_err(|_| DataError::PackageNotFound(id))
    }

    #[inline]
    pub fn contains(&self, id: PackageId) -> bool {
        self.table.contains(&id)
    }

    /// Overwrite the derived status of an existing package.
    pub fn set_status(&mut self, id: PackageId, status: DeliveryStatus) -> DataResult<()> {
        self.get_mut(id)?.status = status;
        Ok(())
    }

    /// Put every package back at the hub.
    pub fn reset_statuses(&mut self) {
        for package in self.table.values_mut() {
            package.status = DeliveryStatus::AtHub;
        }
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> Vec<PackageId> {
        let mut ids: Vec<PackageId> = self.table.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Packages in table order.  Use [`ids`][Self::ids] for a sorted walk.
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.table.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
