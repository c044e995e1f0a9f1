//! Per-truck outcome of one simulate call, and the fleet-wide totals.

use hs_core::SimTime;
use hs_data::Carrier;

/// Where a truck is in its day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteState {
    /// No driver has been free for this batch yet.
    Waiting,
    /// A departure is set but has not been reached.
    Ready(SimTime),
    /// On the road with packages still aboard.
    InProgress,
    /// Every package is delivered; driving back to the hub.
    Returning,
    /// Back at the hub.
    Completed(SimTime),
}

/// What one truck has done by the simulated "now".
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub batch:     String,
    pub carrier:   Carrier,
    /// `None` while the batch waits for a driver.
    pub departure: Option<SimTime>,
    /// Miles covered, capped at `length`.
    pub traveled:  f64,
    /// Total route miles, return leg included.
    pub length:    f64,
    /// Set once the truck is back at the hub.
    pub route_end: Option<SimTime>,
    pub completed: bool,
    pub delivered: usize,
    pub packages:  usize,
    pub state:     RouteState,
}

/// Every truck's result at one "now", plus the totals a status summary needs.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetSnapshot {
    pub now:            SimTime,
    pub results:        Vec<SimulationResult>,
    pub delivered:      usize,
    pub total:          usize,
    pub miles_traveled: f64,
    pub miles_required: f64,
    /// Latest return to the hub among completed trucks.
    pub latest_end:     Option<SimTime>,
}

impl FleetSnapshot {
    pub fn new(now: SimTime, results: Vec<SimulationResult>) -> Self {
        let delivered = results.iter().map(|r| r.delivered).sum();
        let total = results.iter().map(|r| r.packages).sum();
        let miles_traveled = results.iter().map(|r| r.traveled).sum();
        let miles_required = results.iter().map(|r| r.length).sum();
        let latest_end = results
            .iter()
            .filter_map(|r| r.route_end)
            .reduce(SimTime::max);
        Self { now, results, delivered, total, miles_traveled, miles_required, latest_end }
    }

    /// `true` once every truck is back at the hub.
    pub fn all_completed(&self) -> bool {
        self.results.iter().all(|r| r.completed)
    }

    pub fn result(&self, batch: &str) -> Option<&SimulationResult> {
        self.results.iter().find(|r| r.batch == batch)
    }
}
