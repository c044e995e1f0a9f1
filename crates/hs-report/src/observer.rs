//! `ReportObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use hs_core::{DayClock, PackageId};
use hs_data::DeliveryStatus;
use hs_sim::{FleetSnapshot, SimObserver};
use tracing::warn;

use crate::row::{PackageStatusRow, RouteSummaryRow};
use crate::writer::OutputWriter;
use crate::{ReportError, ReportResult};

/// A [`SimObserver`] that writes one package row per package and one route
/// row per truck for every simulate call.
///
/// Package statuses are buffered until the call ends, when the simulated
/// "now" is known.  Errors from the writer are stored internally because
/// `SimObserver` methods have no return value; check them with
/// [`take_error`][Self::take_error].
pub struct ReportObserver<W: OutputWriter> {
    writer:     W,
    clock:      DayClock,
    pending:    Vec<(PackageId, DeliveryStatus)>,
    last_error: Option<ReportError>,
}

impl<W: OutputWriter> ReportObserver<W> {
    pub fn new(writer: W, clock: DayClock) -> Self {
        Self { writer, clock, pending: Vec::new(), last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<ReportError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files afterwards).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_snapshot(&mut self, snapshot: &FleetSnapshot) -> ReportResult<()> {
        let rows: Vec<PackageStatusRow> = self
            .pending
            .drain(..)
            .map(|(id, status)| PackageStatusRow::new(snapshot.now, id, &status, &self.clock))
            .collect();
        if !rows.is_empty() {
            self.writer.write_package_statuses(&rows)?;
        }
        for result in &snapshot.results {
            self.writer
                .write_route_summary(&RouteSummaryRow::new(snapshot.now, result, &self.clock))?;
        }
        self.writer.finish()
    }

    fn store_err(&mut self, result: ReportResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "status report write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for ReportObserver<W> {
    fn on_package(&mut self, id: PackageId, status: &DeliveryStatus) {
        self.pending.push((id, status.clone()));
    }

    fn on_sim_end(&mut self, snapshot: &FleetSnapshot) {
        let result = self.write_snapshot(snapshot);
        self.store_err(result);
    }
}
