//! Route planning trait and the default greedy nearest-neighbor planner.
//!
//! # Selection rule
//!
//! From the current position (the hub, then each placed stop) the
//! [`GreedyPlanner`] scans the unplaced packages in batch order:
//!
//! 1. A package at distance exactly 0 is taken at once.  The first such
//!    package wins and no deadline is consulted.
//! 2. Otherwise a running best is kept.  A candidate with a strictly earlier
//!    deadline replaces it whatever the distance; a later deadline is
//!    skipped even when closer; equal deadlines go to the shorter distance
//!    (the earlier candidate keeps an exact tie).  Packages without a
//!    deadline carry `SimTime::END_OF_DAY`.
//!
//! With [`GreedyPlanner::hold_within`] the first half of rule 2 gets an
//! exception: once the running best lies within the given miles, an
//! earlier-deadline candidate no longer displaces it.
//!
//! After the last stop one more leg is appended: back to the hub.
//!
//! # Complexity
//!
//! O(n²) distance lookups for a batch of n packages.

use hs_core::{AssociativeTable, PackageId, SimTime};
use hs_data::{Depot, DistanceIndex, HUB};
use tracing::debug;

use crate::{Route, RouteError, RouteResult};

// ── RoutePlanner trait ────────────────────────────────────────────────────────

/// Pluggable route construction.
///
/// Implementations must be pure: the same depot contents and batch always
/// yield the same route.
pub trait RoutePlanner {
    /// Order `batch` into a route starting and ending at the hub.
    fn plan(&self, depot: &Depot, batch: &[PackageId]) -> RouteResult<Route>;
}

// ── GreedyPlanner ─────────────────────────────────────────────────────────────

/// Nearest neighbor with deadline priority.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GreedyPlanner {
    /// Miles within which the running best is held against earlier
    /// deadlines.  `None`: earlier deadlines always win.
    pub hold_within: Option<f64>,
}

impl GreedyPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold a running best that is `miles` or closer.
    pub fn hold_within(miles: f64) -> Self {
        Self { hold_within: Some(miles) }
    }

    #[inline]
    fn holds(&self, best_miles: f64) -> bool {
        self.hold_within.is_some_and(|limit| best_miles <= limit)
    }

    /// Pick the next stop from `from`.  `None` once nothing is left.
    fn select(
        &self,
        distances: &DistanceIndex,
        from: &str,
        candidates: &[Candidate<'_>],
    ) -> RouteResult<Option<(usize, f64)>> {
        let mut best: Option<(usize, f64)> = None;

        for (i, candidate) in candidates.iter().enumerate() {
            let miles = distances.get_distance(from, candidate.address)?;
            if miles == 0.0 {
                return Ok(Some((i, miles)));
            }

            let Some((best_i, best_miles)) = best else {
                best = Some((i, miles));
                continue;
            };

            let best_deadline = candidates[best_i].deadline;
            if candidate.deadline < best_deadline {
                if !self.holds(best_miles) {
                    best = Some((i, miles));
                }
            } else if candidate.deadline == best_deadline && miles < best_miles {
                best = Some((i, miles));
            }
        }

        Ok(best)
    }
}

impl RoutePlanner for GreedyPlanner {
    fn plan(&self, depot: &Depot, batch: &[PackageId]) -> RouteResult<Route> {
        let mut unplaced = resolve(depot, batch)?;
        let mut route = Route {
            package_order: Vec::with_capacity(batch.len()),
            legs:          Vec::with_capacity(batch.len() + 1),
        };

        let mut position = HUB;
        while let Some((i, miles)) = self.select(&depot.distances, position, &unplaced)? {
            let next = unplaced.remove(i);
            debug!(package = %next.id, miles, from = position, to = next.address, "route leg");
            route.package_order.push(next.id);
            route.legs.push(miles);
            position = next.address;
        }

        route.legs.push(depot.distances.get_distance(position, HUB)?);
        debug!(
            stops = route.len(),
            miles = route.total_distance(),
            "route planned"
        );
        Ok(route)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The fields of a package the planner compares.
struct Candidate<'a> {
    id:       PackageId,
    address:  &'a str,
    deadline: SimTime,
}

/// Look up every batch member once, rejecting repeats.
fn resolve<'a>(depot: &'a Depot, batch: &[PackageId]) -> RouteResult<Vec<Candidate<'a>>> {
    let mut seen: AssociativeTable<PackageId, ()> = AssociativeTable::with_capacity(batch.len());
    batch
        .iter()
        .map(|&id| -> RouteResult<Candidate<'a>> {
            if seen.put(id, ()).is_some() {
                return Err(RouteError::DuplicatePackage(id));
            }
            let package = depot.packages.get(id)?;
            Ok(Candidate {
                id,
                address: package.address.as_str(),
                deadline: package.deadline,
            })
        })
        .collect()
}
