//! CSV report backend.
//!
//! Creates two files in the configured output directory:
//! - `package_status.csv`
//! - `route_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{PackageStatusRow, ReportResult, RouteSummaryRow};

pub const PACKAGE_STATUS_FILE: &str = "package_status.csv";
pub const ROUTE_SUMMARY_FILE: &str = "route_summary.csv";

/// Writes status reports to two CSV files.
pub struct CsvWriter {
    packages: Writer<File>,
    routes:   Writer<File>,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the two CSV files and write
    /// the header rows.
    pub fn new(dir: &Path) -> ReportResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut packages = Writer::from_path(dir.join(PACKAGE_STATUS_FILE))?;
        packages.write_record(["time", "package_id", "status", "carrier", "delivered_at"])?;

        let mut routes = Writer::from_path(dir.join(ROUTE_SUMMARY_FILE))?;
        routes.write_record([
            "time",
            "batch",
            "carrier",
            "state",
            "departure",
            "traveled_miles",
            "route_miles",
            "delivered",
            "packages",
            "route_end",
        ])?;

        Ok(Self { packages, routes })
    }
}

impl OutputWriter for CsvWriter {
    fn write_package_statuses(&mut self, rows: &[PackageStatusRow]) -> ReportResult<()> {
        for row in rows {
            self.packages.write_record(&[
                row.time.clone(),
                row.package_id.to_string(),
                row.status.to_owned(),
                row.carrier.clone(),
                row.delivered_at.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_route_summary(&mut self, row: &RouteSummaryRow) -> ReportResult<()> {
        self.routes.write_record(&[
            row.time.clone(),
            row.batch.clone(),
            row.carrier.clone(),
            row.state.to_owned(),
            row.departure.clone(),
            format!("{:.2}", row.traveled_miles),
            format!("{:.2}", row.route_miles),
            row.delivered.to_string(),
            row.packages.to_string(),
            row.route_end.clone(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        self.packages.flush()?;
        self.routes.flush()?;
        Ok(())
    }
}
