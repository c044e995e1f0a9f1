//! Human-readable status lines for packages, routes, and the whole fleet.
//!
//! Package vocabulary:
//!
//! | Status       | Text                                          |
//! |--------------|-----------------------------------------------|
//! | at hub       | `At the hub`                                  |
//! | in transit   | `In transit on <carrier>`                     |
//! | delivered    | `Delivered at <time> by <carrier>`            |
//! | late         | `Late: delivered at <time> by <carrier>`      |
//!
//! Route vocabulary follows [`RouteState`].

use std::fmt;

use hs_core::{DayClock, PackageId};
use hs_data::{DeliveryStatus, Package};
use hs_sim::{FleetSnapshot, RouteState, SimulationResult};

// ── Package ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub id:       PackageId,
    pub address:  String,
    pub deadline: String,
    pub status:   String,
    pub late:     bool,
}

impl StatusLine {
    pub fn for_package(package: &Package, clock: &DayClock) -> Self {
        let late = package.is_late();
        let status = match &package.status {
            DeliveryStatus::AtHub => "At the hub".to_owned(),
            DeliveryStatus::InTransit { carrier } => format!("In transit on {carrier}"),
            DeliveryStatus::Delivered { at, carrier } if late => {
                format!("Late: delivered at {} by {carrier}", clock.format(*at))
            }
            DeliveryStatus::Delivered { at, carrier } => {
                format!("Delivered at {} by {carrier}", clock.format(*at))
            }
        };
        Self {
            id: package.id,
            address: package.address.clone(),
            deadline: clock.format(package.deadline),
            status,
            late,
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Package {:>3} | {:<40} | due {:>8} | {}",
            self.id, self.address, self.deadline, self.status
        )
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// Text for a route state, e.g. `Route completed at 10:42 AM`.
pub fn route_state_text(state: RouteState, clock: &DayClock) -> String {
    match state {
        RouteState::Waiting => "Waiting for a truck to return".to_owned(),
        RouteState::Ready(at) => format!("Ready for departure at {}", clock.format(at)),
        RouteState::InProgress => "Route in progress".to_owned(),
        RouteState::Returning => "Returning to hub".to_owned(),
        RouteState::Completed(at) => format!("Route completed at {}", clock.format(at)),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteLine {
    pub batch:     String,
    pub carrier:   String,
    pub state:     String,
    pub traveled:  f64,
    pub length:    f64,
    pub delivered: usize,
    pub packages:  usize,
}

impl RouteLine {
    pub fn for_result(result: &SimulationResult, clock: &DayClock) -> Self {
        Self {
            batch:     result.batch.clone(),
            carrier:   result.carrier.to_string(),
            state:     route_state_text(result.state, clock),
            traveled:  result.traveled,
            length:    result.length,
            delivered: result.delivered,
            packages:  result.packages,
        }
    }
}

impl fmt::Display for RouteLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | {:.1} of {:.1} miles | {}/{} delivered",
            self.carrier, self.state, self.traveled, self.length, self.delivered, self.packages
        )
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct FleetSummary {
    pub now:            String,
    pub delivered:      usize,
    pub total:          usize,
    pub miles_traveled: f64,
    pub miles_required: f64,
    pub latest_end:     Option<String>,
    pub routes:         Vec<RouteLine>,
}

impl FleetSummary {
    pub fn from_snapshot(snapshot: &FleetSnapshot, clock: &DayClock) -> Self {
        Self {
            now:            clock.format(snapshot.now),
            delivered:      snapshot.delivered,
            total:          snapshot.total,
            miles_traveled: snapshot.miles_traveled,
            miles_required: snapshot.miles_required,
            latest_end:     snapshot.latest_end.map(|t| clock.format(t)),
            routes: snapshot
                .results
                .iter()
                .map(|r| RouteLine::for_result(r, clock))
                .collect(),
        }
    }
}

impl fmt::Display for FleetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fleet status at {}", self.now)?;
        writeln!(f, "  Packages delivered: {}/{}", self.delivered, self.total)?;
        writeln!(
            f,
            "  Miles traveled:     {:.1}/{:.1}",
            self.miles_traveled, self.miles_required
        )?;
        if let Some(end) = &self.latest_end {
            writeln!(f, "  Last truck back:    {end}")?;
        }
        for route in &self.routes {
            writeln!(f, "  {route}")?;
        }
        Ok(())
    }
}
