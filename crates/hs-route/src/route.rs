//! The `Route` value produced by a planner.

use hs_core::PackageId;

/// One truck's delivery order and the miles driven to reach each stop.
///
/// `legs[i]` is the distance from the previous stop (the hub for `i == 0`)
/// to `package_order[i]`; the final entry is the drive back to the hub, so
/// `legs.len() == package_order.len() + 1` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub package_order: Vec<PackageId>,
    pub legs:          Vec<f64>,
}

impl Route {
    /// A route with no stops: hub to hub, zero miles.
    pub fn empty() -> Self {
        Self { package_order: vec![], legs: vec![0.0] }
    }

    /// Number of stops.
    #[inline]
    pub fn len(&self) -> usize {
        self.package_order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.package_order.is_empty()
    }

    /// Sum of every leg, including the return to the hub.
    pub fn total_distance(&self) -> f64 {
        self.legs.iter().fold(0.0, |acc, leg| acc + leg)
    }

    /// The final hub-bound leg.
    pub fn return_leg(&self) -> f64 {
        self.legs.last().copied().unwrap_or(0.0)
    }

    /// Each stop with the cumulative miles needed to reach it.
    ///
    /// Accumulates in the same order as [`total_distance`][Self::total_distance],
    /// so the last stop's figure never exceeds the route total.
    pub fn stops(&self) -> impl Iterator<Item = (PackageId, f64)> + '_ {
        self.package_order
            .iter()
            .zip(&self.legs)
            .scan(0.0, |acc, (&id, &leg)| {
                *acc += leg;
                Some((id, *acc))
            })
    }

    /// Cumulative miles at each stop, in route order.
    pub fn cumulative(&self) -> Vec<f64> {
        self.stops().map(|(_, miles)| miles).collect()
    }

    /// Miles to the last stop, i.e. the total minus the return leg.
    pub fn delivery_distance(&self) -> f64 {
        self.stops().last().map(|(_, miles)| miles).unwrap_or(0.0)
    }

    /// `true` if `legs` has exactly one more entry than `package_order`.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.legs.len() == self.package_order.len() + 1
    }
}
