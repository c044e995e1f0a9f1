//! The `OutputWriter` trait implemented by report backends.

use crate::{PackageStatusRow, ReportResult, RouteSummaryRow};

/// Sink for package and route rows.
///
/// Errors surfaced during a simulation are stored by
/// [`ReportObserver`][crate::ReportObserver] and retrieved with
/// [`take_error`][crate::ReportObserver::take_error].
pub trait OutputWriter {
    fn write_package_statuses(&mut self, rows: &[PackageStatusRow]) -> ReportResult<()>;

    fn write_route_summary(&mut self, row: &RouteSummaryRow) -> ReportResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> ReportResult<()>;
}
