//! `hs-core` — foundational types for the `hubsim` delivery simulator.
//!
//! This crate is a dependency of every other `hs-*` crate.  It has no `hs-*`
//! dependencies and minimal external ones (`rustc-hash` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PackageId`                                           |
//! | [`time`]        | `SimTime`, `DayClock`                                 |
//! | [`table`]       | `AssociativeTable` (chained, power-of-two buckets)    |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and time types.      |

pub mod error;
pub mod ids;
pub mod table;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::PackageId;
pub use table::AssociativeTable;
pub use time::{DayClock, SimTime};
