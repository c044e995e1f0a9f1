//! CSV loaders for the two input tables.
//!
//! # Distance CSV
//!
//! Headerless grid; see [`crate::distance`] for the layout.  Rows may be
//! ragged (a lower triangle often omits trailing cells).
//!
//! # Package CSV
//!
//! One row per package, with a header row:
//!
//! ```csv
//! id,address,city,state,zipcode,deadline,mass,available
//! 1,195 W Oakland Ave,Salt Lake City,UT,84115,10:30 AM,21,
//! 6,3060 Lester St,West Valley City,UT,84119,10:30 AM,88,9:05 AM
//! 9,300 State St,Salt Lake City,UT,84103,EOD,2,10:20 AM
//! ```
//!
//! | Column      | Values                                         |
//! |-------------|------------------------------------------------|
//! | `deadline`  | 12-hour clock time or `EOD`                    |
//! | `available` | 12-hour clock time, `BOD`, blank, or absent    |

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use hs_core::{DayClock, PackageId};

use crate::{DataError, DataResult, DeliveryStatus, DistanceIndex, Package, PackageRegistry};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PackageRecord {
    id:        u32,
    address:   String,
    city:      String,
    state:     String,
    zipcode:   String,
    deadline:  String,
    mass:      f64,
    #[serde(default)]
    available: Option<String>,
}

// ── Distances ─────────────────────────────────────────────────────────────────

/// Load a distance grid from a CSV file and verify it.
pub fn load_distances_csv(path: &Path) -> DataResult<DistanceIndex> {
    let file = std::fs::File::open(path)?;
    load_distances_reader(file)
}

/// Like [`load_distances_csv`] but accepts any `Read` source.
///
/// Fails with [`DataError::ConflictingCell`] when the grid fills both
/// triangles with different values.
pub fn load_distances_reader<R: Read>(reader: R) -> DataResult<DistanceIndex> {
    let rows = read_distance_rows(reader)?;
    let index = DistanceIndex::from_rows(&rows);
    index.verify_against(&rows)?;
    info!(addresses = index.address_count(), "loaded distance index");
    Ok(index)
}

/// Read the raw grid without interpreting it.
pub fn read_distance_rows<R: Read>(reader: R) -> DataResult<Vec<Vec<String>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    csv_reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(str::to_owned).collect::<Vec<String>>())
                .map_err(|e| DataError::Parse(e.to_string()))
        })
        .collect()
}

// ── Packages ──────────────────────────────────────────────────────────────────

/// Load the package table from a CSV file.
pub fn load_packages_csv(path: &Path, clock: &DayClock) -> DataResult<PackageRegistry> {
    let file = std::fs::File::open(path)?;
    load_packages_reader(file, clock)
}

/// Like [`load_packages_csv`] but accepts any `Read` source.
pub fn load_packages_reader<R: Read>(reader: R, clock: &DayClock) -> DataResult<PackageRegistry> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let packages = csv_reader
        .deserialize::<PackageRecord>()
        .map(|result| {
            let row = result.map_err(|e| DataError::Parse(e.to_string()))?;
            to_package(row, clock)
        })
        .collect::<DataResult<Vec<Package>>>()?;

    let registry = PackageRegistry::from_packages(packages)?;
    info!(packages = registry.len(), "loaded package registry");
    Ok(registry)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn to_package(row: PackageRecord, clock: &DayClock) -> DataResult<Package> {
    let id = PackageId(row.id);
    let deadline = clock
        .parse_deadline(&row.deadline)
        .map_err(|e| DataError::Parse(format!("package {id} deadline: {e}")))?;
    let available_at = clock
        .parse_availability(row.available.as_deref().unwrap_or(""))
        .map_err(|e| DataError::Parse(format!("package {id} availability: {e}")))?;

    Ok(Package {
        id,
        address: row.address,
        city: row.city,
        state: row.state,
        zipcode: row.zipcode,
        deadline,
        available_at,
        mass: row.mass,
        status: DeliveryStatus::AtHub,
    })
}
