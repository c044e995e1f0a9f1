//! The `DeliverySimulator` and its per-truck status derivation.

use hs_core::SimTime;
use hs_data::{Carrier, DeliveryStatus, Depot, PackageRegistry};
use hs_route::{GreedyPlanner, Route, RoutePlanner};
use tracing::{debug, info};

use crate::{
    DeparturePolicy, FleetConfig, FleetSnapshot, RouteState, SimObserver, SimResult,
    SimulationResult,
};

// ── Planned batch ─────────────────────────────────────────────────────────────

/// A batch with its route fixed, ready to be simulated at any "now".
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedBatch {
    pub name:      String,
    pub route:     Route,
    pub departure: DeparturePolicy,
    /// Latest availability among the batch's packages.
    pub available: SimTime,
}

// ── Driver pool ───────────────────────────────────────────────────────────────

/// A driver who can take out a waiting batch.
#[derive(Debug, Clone)]
struct FreeDriver {
    /// The truck this driver first drove; `None` for a driver idle since
    /// day start.
    first_truck: Option<String>,
    free_at:     SimTime,
}

/// Take the driver who became free earliest; the first listed wins a tie.
fn take_earliest(pool: &mut Vec<FreeDriver>) -> Option<FreeDriver> {
    let mut best: Option<usize> = None;
    for (i, driver) in pool.iter().enumerate() {
        if best.is_none_or(|b| driver.free_at < pool[b].free_at) {
            best = Some(i);
        }
    }
    best.map(|i| pool.remove(i))
}

// ── DeliverySimulator ─────────────────────────────────────────────────────────

/// Derives where every package is at a simulated "now".
///
/// Status is a pure function of (route, departure, speed, now), so any "now"
/// can be asked in any order; the only side effect is the write of each
/// package's status into the registry.
///
/// # Handoff
///
/// First-wave batches (`At` / `WhenAvailable`) each take a driver.
/// `AfterReturn` batches are then served in configuration order: each takes
/// the driver who became free earliest, where spare drivers are free from day
/// start and a first-wave driver is free once its truck is back by "now".  The
/// batch departs at the later of its own availability and that driver's return.
/// With no free driver the batch stays at the hub and its departure is `None`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
#[derive(Debug, Clone)]
pub struct DeliverySimulator<P: RoutePlanner = GreedyPlanner> {
    pub config:  FleetConfig,
    pub planner: P,
}

impl<P: RoutePlanner> DeliverySimulator<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Plan a route for every configured batch.
    pub fn plan(&self, depot: &Depot) -> SimResult<Vec<PlannedBatch>> {
        self.config
            .batches
            .iter()
            .map(|batch| {
                let route = self.planner.plan(depot, &batch.packages)?;
                let mut available = SimTime::START_OF_DAY;
                for &id in &batch.packages {
                    available = available.max(depot.packages.get(id)?.available_at);
                }
                debug!(
                    batch = %batch.name,
                    stops = route.len(),
                    miles = route.total_distance(),
                    available = available.hours(),
                    "batch planned"
                );
                Ok(PlannedBatch {
                    name: batch.name.clone(),
                    route,
                    departure: batch.departure,
                    available,
                })
            })
            .collect()
    }

    /// Derive every planned package's status at `now` and write it into
    /// `packages`.
    ///
    /// Packages outside every batch are reset to `AtHub`.
    pub fn simulate<O: SimObserver>(
        &self,
        plans:    &[PlannedBatch],
        packages: &mut PackageRegistry,
        now:      SimTime,
        observer: &mut O,
    ) -> SimResult<FleetSnapshot> {
        packages.reset_statuses();
        let mut results: Vec<Option<SimulationResult>> = vec![None; plans.len()];
        let mut pool: Vec<FreeDriver> = Vec::with_capacity(self.config.drivers);

        // ── First wave ────────────────────────────────────────────────────
        for (i, plan) in plans.iter().enumerate() {
            let departure = match plan.departure {
                DeparturePolicy::At(t) => t,
                DeparturePolicy::WhenAvailable => plan.available,
                DeparturePolicy::AfterReturn => continue,
            };
            let result =
                self.drive(plan, Some(departure), Carrier::new(&plan.name), packages, now, observer)?;
            if let Some(end) = result.route_end {
                pool.push(FreeDriver { first_truck: Some(plan.name.clone()), free_at: end });
            }
            results[i] = Some(result);
        }

        let first_wave = plans.iter().filter(|p| p.departure.is_first_wave()).count();
        let spare = self.config.drivers.saturating_sub(first_wave);
        pool.extend((0..spare).map(|_| FreeDriver {
            first_truck: None,
            free_at:     SimTime::START_OF_DAY,
        }));

        // ── Waiting batches, in configuration order ───────────────────────
        for (i, plan) in plans.iter().enumerate() {
            if plan.departure.is_first_wave() {
                continue;
            }
            let result = match take_earliest(&mut pool) {
                Some(driver) => {
                    let departure = plan.available.max(driver.free_at);
                    let carrier = match &driver.first_truck {
                        Some(first) => Carrier::handoff(&plan.name, first),
                        None => Carrier::new(&plan.name),
                    };
                    debug!(
                        batch = %plan.name,
                        driver = %carrier.driver,
                        departure = departure.hours(),
                        "driver handoff"
                    );
                    let result = self.drive(plan, Some(departure), carrier, packages, now, observer)?;
                    if let Some(end) = result.route_end {
                        pool.push(FreeDriver { first_truck: driver.first_truck, free_at: end });
                    }
                    result
                }
                None => {
                    debug!(batch = %plan.name, "no driver free, batch waits at hub");
                    self.drive(plan, None, Carrier::new(&plan.name), packages, now, observer)?
                }
            };
            results[i] = Some(result);
        }

        let snapshot = FleetSnapshot::new(now, results.into_iter().flatten().collect());
        info!(
            now = now.hours(),
            delivered = snapshot.delivered,
            total = snapshot.total,
            miles = snapshot.miles_traveled,
            "fleet simulated"
        );
        observer.on_sim_end(&snapshot);
        Ok(snapshot)
    }

    /// Plan every batch from `depot` and simulate it at `now`.
    pub fn run<O: SimObserver>(
        &self,
        depot:    &mut Depot,
        now:      SimTime,
        observer: &mut O,
    ) -> SimResult<FleetSnapshot> {
        let plans = self.plan(depot)?;
        self.simulate(&plans, &mut depot.packages, now, observer)
    }

    // ── Per-truck derivation ──────────────────────────────────────────────

    /// Walk one route at `now`, writing each package's status.
    fn drive<O: SimObserver>(
        &self,
        plan:      &PlannedBatch,
        departure: Option<SimTime>,
        carrier:   Carrier,
        packages:  &mut PackageRegistry,
        now:       SimTime,
        observer:  &mut O,
    ) -> SimResult<SimulationResult> {
        let speed = self.config.speed_mph;
        let length = plan.route.total_distance();

        // Holds the departure only once it has been reached.
        let started = departure.filter(|&dep| now >= dep);
        let traveled = match started {
            Some(dep) => (speed * (now - dep)).clamp(0.0, length),
            None => 0.0,
        };
        if let Some(dep) = started {
            observer.on_departure(&plan.name, &carrier, dep);
        }

        let mut delivered = 0;
        for (id, cumulative) in plan.route.stops() {
            let status = match started {
                Some(dep) if cumulative <= traveled => {
                    delivered += 1;
                    DeliveryStatus::Delivered {
                        at:      dep + cumulative / speed,
                        carrier: carrier.clone(),
                    }
                }
                _ if traveled > 0.0 => DeliveryStatus::InTransit { carrier: carrier.clone() },
                _ => DeliveryStatus::AtHub,
            };
            packages.set_status(id, status.clone())?;
            observer.on_package(id, &status);
        }

        let completed = started.is_some() && traveled >= length;
        let route_end = started.filter(|_| completed).map(|dep| dep + length / speed);
        let state = match (departure, route_end) {
            (None, _) => RouteState::Waiting,
            (_, Some(end)) => RouteState::Completed(end),
            (Some(dep), None) if traveled == 0.0 && delivered == 0 => RouteState::Ready(dep),
            _ if delivered == plan.route.len() => RouteState::Returning,
            _ => RouteState::InProgress,
        };

        let result = SimulationResult {
            batch: plan.name.clone(),
            carrier,
            departure,
            traveled,
            length,
            route_end,
            completed,
            delivered,
            packages: plan.route.len(),
            state,
        };
        observer.on_route_end(&result);
        Ok(result)
    }
}
