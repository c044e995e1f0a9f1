//! `hs-data` — the two lookup structures every other stage reads from.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`distance`]  | `DistanceIndex` (table of tables), `HUB`                  |
//! | [`package`]   | `Package`, `DeliveryStatus`, `Carrier`                    |
//! | [`registry`]  | `PackageRegistry` (`PackageId` → `Package`)               |
//! | [`loader`]    | `load_distances_csv`, `load_packages_csv` and `_reader`s  |
//! | [`depot`]     | `Depot`, the context handed to planner and simulator      |
//! | [`error`]     | `DataError`, `DataResult<T>`                              |
//!
//! Both structures are built once at start-up.  After that only the
//! `status` field of a `Package` changes, and only through the simulator.

pub mod depot;
pub mod distance;
pub mod error;
pub mod loader;
pub mod package;
pub mod registry;


pub use depot::Depot;
pub use distance::{DistanceIndex, HUB};
pub use error::{DataError, DataResult};
pub use loader::{
    load_distances_csv, load_distances_reader, load_packages_csv, load_packages_reader,
    read_distance_rows,
};
pub use package::{Carrier, DeliveryStatus, Package};
pub use registry::PackageRegistry;
