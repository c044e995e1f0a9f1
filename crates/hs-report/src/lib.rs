//! `hs-report` — status text and report writers for hubsim.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`status`]   | `StatusLine`, `RouteLine`, `FleetSummary` (display text)  |
//! | [`row`]      | `PackageStatusRow`, `RouteSummaryRow`                     |
//! | [`writer`]   | `OutputWriter` trait                                      |
//! | [`csv`]      | `CsvWriter`: `package_status.csv`, `route_summary.csv`    |
//! | [`observer`] | `ReportObserver`, implementing `hs_sim::SimObserver`      |
//!
//! # Usage
//!
//! ```rust,ignore
//! use hs_report::{CsvWriter, ReportObserver};
//!
//! let writer = CsvWriter::new(Path::new("./report"))?;
//! let mut obs = ReportObserver::new(writer, depot.clock);
//! sim.run(&mut depot, now, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("report error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod status;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{ReportError, ReportResult};
pub use observer::ReportObserver;
pub use row::{PackageStatusRow, RouteSummaryRow};
pub use status::{route_state_text, FleetSummary, RouteLine, StatusLine};
pub use writer::OutputWriter;
