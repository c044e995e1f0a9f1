//! Plain data row types written by report backends.

use hs_core::{DayClock, PackageId, SimTime};
use hs_data::DeliveryStatus;
use hs_sim::{RouteState, SimulationResult};

/// One package's status at a simulated "now".
#[derive(Debug, Clone, PartialEq)]
pub struct PackageStatusRow {
    /// Clock reading of the simulated "now".
    pub time:         String,
    pub package_id:   u32,
    /// `at_hub`, `in_transit` or `delivered`.
    pub status:       &'static str,
    /// Empty while at the hub.
    pub carrier:      String,
    /// Empty until delivered.
    pub delivered_at: String,
}

impl PackageStatusRow {
    pub fn new(now: SimTime, id: PackageId, status: &DeliveryStatus, clock: &DayClock) -> Self {
        let code = match status {
            DeliveryStatus::AtHub => "at_hub",
            DeliveryStatus::InTransit { .. } => "in_transit",
            DeliveryStatus::Delivered { .. } => "delivered",
        };
        Self {
            time:         clock.format(now),
            package_id:   id.0,
            status:       code,
            carrier:      status.carrier().map(ToString::to_string).unwrap_or_default(),
            delivered_at: status.delivered_at().map(|t| clock.format(t)).unwrap_or_default(),
        }
    }
}

/// One truck's progress at a simulated "now".
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummaryRow {
    pub time:           String,
    pub batch:          String,
    pub carrier:        String,
    /// `waiting`, `ready`, `in_progress`, `returning` or `completed`.
    pub state:          &'static str,
    /// Empty while waiting for a driver.
    pub departure:      String,
    pub traveled_miles: f64,
    pub route_miles:    f64,
    pub delivered:      usize,
    pub packages:       usize,
    /// Empty until the truck is back.
    pub route_end:      String,
}

impl RouteSummaryRow {
    pub fn new(now: SimTime, result: &SimulationResult, clock: &DayClock) -> Self {
        let state = match result.state {
            RouteState::Waiting => "waiting",
            RouteState::Ready(_) => "ready",
            RouteState::InProgress => "in_progress",
            RouteState::Returning => "returning",
            RouteState::Completed(_) => "completed",
        };
        Self {
            time:           clock.format(now),
            batch:          result.batch.clone(),
            carrier:        result.carrier.to_string(),
            state,
            departure:      result.departure.map(|t| clock.format(t)).unwrap_or_default(),
            traveled_miles: result.traveled,
            route_miles:    result.length,
            delivered:      result.delivered,
            packages:       result.packages,
            route_end:      result.route_end.map(|t| clock.format(t)).unwrap_or_default(),
        }
    }
}
