//! Unit tests for hs-sim.

use hs_core::{DayClock, PackageId, SimTime};
use hs_data::{Carrier, DataError, DeliveryStatus, Depot, DistanceIndex, Package, PackageRegistry, HUB};

use crate::{
    BatchSpec, DeliverySimulator, DeparturePolicy, FleetConfig, FleetSnapshot, NoopObserver,
    RouteState, SimBuilder, SimError, SimObserver, SimulationResult,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const T1: &str = "Truck 1";
const T2: &str = "Truck 2";
const T3: &str = "Truck 3";
const T4: &str = "Truck 4";

/// ```text
///        HUB   A   B   C
/// HUB     0   10  20   5
/// A            0  15  12
/// B                0  18
/// ```
fn grid() -> DistanceIndex {
    let mut idx = DistanceIndex::new();
    for (a, b, d) in [
        (HUB, HUB, 0.0),
        (HUB, "A", 10.0),
        (HUB, "B", 20.0),
        (HUB, "C", 5.0),
        ("A", "A", 0.0),
        ("A", "B", 15.0),
        ("A", "C", 12.0),
        ("B", "B", 0.0),
        ("B", "C", 18.0),
        ("C", "C", 0.0),
    ] {
        idx.insert(a, b, d);
    }
    idx
}

/// P1 @ A, P2 @ B, P3 @ C, P4 @ B, P5 @ A (never batched), P6 @ HUB.
fn depot() -> Depot {
    let packages = PackageRegistry::from_packages([
        Package::new(PackageId(1), "A"),
        Package::new(PackageId(2), "B"),
        Package::new(PackageId(3), "C"),
        Package::new(PackageId(4), "B"),
        Package::new(PackageId(5), "A"),
        Package::new(PackageId(6), HUB),
    ])
    .unwrap();
    Depot::new(grid(), packages, DayClock::default())
}

fn batch(name: &str, ids: &[u32], departure: DeparturePolicy) -> BatchSpec {
    BatchSpec::new(name, ids.iter().copied().map(PackageId).collect(), departure)
}

fn at(hours: f64) -> DeparturePolicy {
    DeparturePolicy::At(SimTime(hours))
}

/// 10 mph, two drivers:
/// Truck 1 takes P1 at 0:00 (20 mi, back at 2.0),
/// Truck 2 takes P2 at 1.0 (40 mi, back at 5.0),
/// Truck 3 takes P3 after a return (10 mi).
fn handoff_config() -> FleetConfig {
    FleetConfig { speed_mph: 10.0, drivers: 2, batches: vec![] }
        .with_batch(batch(T1, &[1], at(0.0)))
        .with_batch(batch(T2, &[2], at(1.0)))
        .with_batch(batch(T3, &[3], DeparturePolicy::AfterReturn))
}

fn run_at(config: FleetConfig, depot: &mut Depot, now: f64) -> FleetSnapshot {
    let sim = SimBuilder::from_config(config).build(&depot.packages).unwrap();
    sim.run(depot, SimTime(now), &mut NoopObserver).unwrap()
}

fn status(depot: &Depot, id: u32) -> DeliveryStatus {
    depot.packages.get(PackageId(id)).unwrap().status.clone()
}

fn result<'a>(snapshot: &'a FleetSnapshot, batch: &str) -> &'a SimulationResult {
    snapshot.result(batch).unwrap()
}

// ── Status derivation ─────────────────────────────────────────────────────────

#[cfg(test)]
mod derivation {
    use super::*;

    #[test]
    fn before_departure_everything_at_hub() {
        let mut d = depot();
        let config = FleetConfig::default().with_batch(batch(T2, &[1, 2], at(1.0 + 5.0 / 60.0)));
        let snap = run_at(config, &mut d, 0.5);

        let r = result(&snap, T2);
        assert_eq!(r.traveled, 0.0);
        assert!(!r.completed);
        assert_eq!(r.delivered, 0);
        assert_eq!(r.state, RouteState::Ready(SimTime(1.0 + 5.0 / 60.0)));
        assert_eq!(status(&d, 1), DeliveryStatus::AtHub);
        assert_eq!(status(&d, 2), DeliveryStatus::AtHub);
    }

    #[test]
    fn eighteen_mph_for_three_hours_caps_at_route_length() {
        // A 20 mi out, B 10 mi past A, B 20 mi back: 50 mi.
        let mut idx = DistanceIndex::new();
        for (a, b, m) in [
            (HUB, HUB, 0.0),
            (HUB, "A", 20.0),
            (HUB, "B", 20.0),
            ("A", "A", 0.0),
            ("A", "B", 10.0),
            ("B", "B", 0.0),
        ] {
            idx.insert(a, b, m);
        }
        let packages = PackageRegistry::from_packages([
            Package::new(PackageId(1), "A"),
            Package::new(PackageId(2), "B"),
        ])
        .unwrap();
        let mut d = Depot::new(idx, packages, DayClock::default());

        let config = FleetConfig::default().with_batch(batch(T1, &[1, 2], at(0.0)));
        let snap = run_at(config, &mut d, 3.0);

        let r = result(&snap, T1);
        assert_eq!(r.length, 50.0);
        assert_eq!(r.traveled, 50.0);
        assert!(r.completed);
        assert_eq!(r.delivered, 2);
        let end = r.route_end.unwrap().hours();
        assert!((end - 50.0 / 18.0).abs() < 1e-12);
        assert!(matches!(r.state, RouteState::Completed(_)));

        let carrier = Carrier::new(T1);
        assert_eq!(
            status(&d, 1),
            DeliveryStatus::Delivered { at: SimTime(20.0 / 18.0), carrier: carrier.clone() }
        );
        assert_eq!(
            status(&d, 2),
            DeliveryStatus::Delivered { at: SimTime(30.0 / 18.0), carrier }
        );
    }

    #[test]
    fn partial_route_mixes_delivered_and_in_transit() {
        let mut d = depot();
        let config = FleetConfig { speed_mph: 10.0, ..FleetConfig::default() }
            .with_batch(batch(T1, &[3, 1], at(0.0)));
        // Route: C (5), A (12), HUB (10).  At 1.0 h: 10 mi traveled.
        let snap = run_at(config, &mut d, 1.0);

        let r = result(&snap, T1);
        assert_eq!(r.traveled, 10.0);
        assert_eq!(r.delivered, 1);
        assert_eq!(r.state, RouteState::InProgress);
        assert_eq!(status(&d, 3).delivered_at(), Some(SimTime(0.5)));
        assert_eq!(
            status(&d, 1),
            DeliveryStatus::InTransit { carrier: Carrier::new(T1) }
        );
    }

    #[test]
    fn exactly_at_departure_nothing_moves() {
        let mut d = depot();
        let config = FleetConfig::default().with_batch(batch(T1, &[1], at(1.0)));
        let snap = run_at(config, &mut d, 1.0);
        let r = result(&snap, T1);
        assert_eq!(r.traveled, 0.0);
        assert_eq!(r.state, RouteState::Ready(SimTime(1.0)));
        assert_eq!(status(&d, 1), DeliveryStatus::AtHub);
    }

    #[test]
    fn hub_package_delivered_at_departure() {
        let mut d = depot();
        let config = FleetConfig::default().with_batch(batch(T1, &[6], at(1.0)));
        let snap = run_at(config, &mut d, 1.0);
        let r = result(&snap, T1);
        assert_eq!(r.length, 0.0);
        assert!(r.completed);
        assert_eq!(r.route_end, Some(SimTime(1.0)));
        assert_eq!(status(&d, 6).delivered_at(), Some(SimTime(1.0)));
    }

    #[test]
    fn returning_after_last_drop() {
        let mut d = depot();
        let snap = run_at(handoff_config(), &mut d, 1.5);
        let r = result(&snap, T1);
        assert_eq!(r.traveled, 15.0);
        assert_eq!(r.state, RouteState::Returning);
        assert_eq!(status(&d, 1).delivered_at(), Some(SimTime(1.0)));
    }

    #[test]
    fn when_available_waits_for_latest_package() {
        let mut d = depot();
        d.packages.get_mut(PackageId(2)).unwrap().available_at = SimTime(1.5);
        let config = FleetConfig { speed_mph: 10.0, ..FleetConfig::default() }
            .with_batch(batch(T2, &[1, 2], DeparturePolicy::WhenAvailable));
        let snap = run_at(config, &mut d, 1.0);
        assert_eq!(result(&snap, T2).departure, Some(SimTime(1.5)));
        assert_eq!(result(&snap, T2).state, RouteState::Ready(SimTime(1.5)));
    }

    #[test]
    fn unbatched_packages_reset_to_hub() {
        let mut d = depot();
        d.packages
            .set_status(
                PackageId(5),
                DeliveryStatus::InTransit { carrier: Carrier::new("stale") },
            )
            .unwrap();
        run_at(handoff_config(), &mut d, 1.0);
        assert_eq!(status(&d, 5), DeliveryStatus::AtHub);
    }

    #[test]
    fn simulate_is_repeatable() {
        let mut d = depot();
        let sim = SimBuilder::from_config(handoff_config()).build(&d.packages).unwrap();
        let plans = sim.plan(&d).unwrap();
        let a = sim.simulate(&plans, &mut d.packages, SimTime(2.5), &mut NoopObserver).unwrap();
        // An unrelated earlier query must not leak into the next one.
        sim.simulate(&plans, &mut d.packages, SimTime(9.0), &mut NoopObserver).unwrap();
        let b = sim.simulate(&plans, &mut d.packages, SimTime(2.5), &mut NoopObserver).unwrap();
        assert_eq!(a, b);
    }
}

// ── Handoff ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod handoff {
    use super::*;

    #[test]
    fn waiting_batch_stays_at_hub_until_a_truck_returns() {
        let mut d = depot();
        let snap = run_at(handoff_config(), &mut d, 1.5);
        let r = result(&snap, T3);
        assert_eq!(r.departure, None);
        assert_eq!(r.traveled, 0.0);
        assert_eq!(r.state, RouteState::Waiting);
        assert_eq!(status(&d, 3), DeliveryStatus::AtHub);
    }

    #[test]
    fn first_returning_driver_takes_the_waiting_truck() {
        let mut d = depot();
        let snap = run_at(handoff_config(), &mut d, 2.5);
        let r = result(&snap, T3);
        assert_eq!(r.departure, Some(SimTime(2.0)));
        assert_eq!(r.carrier, Carrier::handoff(T3, T1));
        assert_eq!(r.traveled, 5.0);
        assert_eq!(
            status(&d, 3),
            DeliveryStatus::Delivered { at: SimTime(2.5), carrier: Carrier::handoff(T3, T1) }
        );
    }

    #[test]
    fn handoff_respects_batch_availability() {
        let mut d = depot();
        d.packages.get_mut(PackageId(3)).unwrap().available_at = SimTime(2.5);
        let snap = run_at(handoff_config(), &mut d, 3.0);
        assert_eq!(result(&snap, T3).departure, Some(SimTime(2.5)));
    }

    #[test]
    fn spare_driver_leaves_at_day_start() {
        let mut d = depot();
        let config = FleetConfig { drivers: 3, ..handoff_config() };
        let snap = run_at(config, &mut d, 0.25);
        let r = result(&snap, T3);
        assert_eq!(r.departure, Some(SimTime(0.0)));
        assert_eq!(r.carrier, Carrier::new(T3));
        assert!(!r.carrier.is_handoff());
    }

    #[test]
    fn released_driver_serves_the_next_waiting_batch() {
        // Truck 1's driver is back at 2.0, drives Truck 3 until 3.0, then
        // beats Truck 2's driver (back at 5.0) to Truck 4.
        let mut d = depot();
        let config = handoff_config().with_batch(batch(T4, &[4], DeparturePolicy::AfterReturn));
        let snap = run_at(config, &mut d, 6.0);

        assert_eq!(result(&snap, T3).route_end, Some(SimTime(3.0)));
        let r = result(&snap, T4);
        assert_eq!(r.departure, Some(SimTime(3.0)));
        assert_eq!(r.carrier, Carrier::handoff(T4, T1));
        assert_eq!(r.traveled, 30.0);
        assert_eq!(r.state, RouteState::Returning);
        assert_eq!(status(&d, 4).delivered_at(), Some(SimTime(5.0)));
    }

    #[test]
    fn second_waiting_batch_waits_while_handoff_driver_is_out() {
        let mut d = depot();
        let config = handoff_config().with_batch(batch(T4, &[4], DeparturePolicy::AfterReturn));
        let snap = run_at(config, &mut d, 2.5);
        assert_eq!(result(&snap, T4).state, RouteState::Waiting);
    }

    #[test]
    fn fleet_totals() {
        let mut d = depot();
        let config = handoff_config().with_batch(batch(T4, &[4], DeparturePolicy::AfterReturn));
        let snap = run_at(config, &mut d, 6.0);
        assert_eq!(snap.delivered, 4);
        assert_eq!(snap.total, 4);
        assert_eq!(snap.miles_traveled, 100.0);
        assert_eq!(snap.miles_required, 110.0);
        assert_eq!(snap.latest_end, Some(SimTime(5.0)));
        assert!(!snap.all_completed());
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    fn build(config: FleetConfig) -> Result<DeliverySimulator, SimError> {
        SimBuilder::from_config(config).build(&depot().packages)
    }

    #[test]
    fn default_fleet() {
        let c = FleetConfig::default();
        assert_eq!(c.speed_mph, 18.0);
        assert_eq!(c.drivers, 2);
        assert!(c.batches.is_empty());
    }

    #[test]
    fn builder_setters() {
        let sim = SimBuilder::new()
            .speed_mph(25.0)
            .drivers(1)
            .batch(batch(T1, &[1], at(0.0)))
            .build(&depot().packages)
            .unwrap();
        assert_eq!(sim.config.speed_mph, 25.0);
        assert_eq!(sim.config.drivers, 1);
        assert_eq!(sim.config.batches.len(), 1);
    }

    #[test]
    fn rejects_non_positive_speed() {
        let err = build(FleetConfig { speed_mph: 0.0, ..handoff_config() }).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn rejects_zero_drivers() {
        let err = build(FleetConfig { drivers: 0, ..handoff_config() }).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn rejects_first_wave_larger_than_driver_pool() {
        let config = handoff_config().with_batch(batch(T4, &[4], DeparturePolicy::WhenAvailable));
        assert_eq!(
            build(config).unwrap_err(),
            SimError::NotEnoughDrivers { drivers: 2, needed: 3 }
        );
    }

    #[test]
    fn rejects_package_in_two_batches() {
        let config = handoff_config().with_batch(batch(T4, &[4, 2], DeparturePolicy::AfterReturn));
        assert_eq!(
            build(config).unwrap_err(),
            SimError::DuplicateAssignment {
                package: PackageId(2),
                first:   T2.into(),
                second:  T4.into(),
            }
        );
    }

    #[test]
    fn rejects_duplicate_batch_name() {
        let config = handoff_config().with_batch(batch(T1, &[4], DeparturePolicy::AfterReturn));
        assert_eq!(build(config).unwrap_err(), SimError::DuplicateBatch(T1.into()));
    }

    #[test]
    fn rejects_unknown_package() {
        let config = handoff_config().with_batch(batch(T4, &[99], DeparturePolicy::AfterReturn));
        assert_eq!(
            build(config).unwrap_err(),
            SimError::Data(DataError::PackageNotFound(PackageId(99)))
        );
    }

    #[test]
    fn rejects_negative_departure() {
        let config = FleetConfig::default().with_batch(batch(T1, &[1], at(-1.0)));
        assert!(matches!(build(config).unwrap_err(), SimError::Config(_)));
    }

    #[test]
    fn parses_from_json() {
        let json = r#"{
            "speed_mph": 18.0,
            "drivers": 2,
            "batches": [
                { "name": "Truck 1", "packages": [1, 3], "departure": { "at": 0.0 } },
                { "name": "Truck 2", "packages": [2], "departure": "when_available" },
                { "name": "Truck 3", "packages": [4], "departure": "after_return" }
            ]
        }"#;
        let config: FleetConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.batches[0].departure, at(0.0));
        assert_eq!(config.batches[1].departure, DeparturePolicy::WhenAvailable);
        assert_eq!(config.batches[2].departure, DeparturePolicy::AfterReturn);
        assert_eq!(config.batches[0].packages, vec![PackageId(1), PackageId(3)]);
        assert_eq!(config.first_wave(), 2);
        build(config).unwrap();
    }

    #[test]
    fn json_fields_default() {
        let config: FleetConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, FleetConfig::default());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        departures: Vec<(String, Carrier)>,
        packages:   Vec<PackageId>,
        routes:     Vec<String>,
        ended:      usize,
    }

    impl SimObserver for Recorder {
        fn on_departure(&mut self, batch: &str, carrier: &Carrier, _at: SimTime) {
            self.departures.push((batch.to_owned(), carrier.clone()));
        }
        fn on_package(&mut self, id: PackageId, _status: &DeliveryStatus) {
            self.packages.push(id);
        }
        fn on_route_end(&mut self, result: &SimulationResult) {
            self.routes.push(result.batch.clone());
        }
        fn on_sim_end(&mut self, _snapshot: &FleetSnapshot) {
            self.ended += 1;
        }
    }

    #[test]
    fn hooks_fire_per_truck_and_package() {
        let mut d = depot();
        let sim = SimBuilder::from_config(handoff_config()).build(&d.packages).unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut d, SimTime(2.5), &mut rec).unwrap();

        assert_eq!(
            rec.departures,
            vec![
                (T1.to_owned(), Carrier::new(T1)),
                (T2.to_owned(), Carrier::new(T2)),
                (T3.to_owned(), Carrier::handoff(T3, T1)),
            ]
        );
        assert_eq!(rec.packages, vec![PackageId(1), PackageId(2), PackageId(3)]);
        assert_eq!(rec.routes, vec![T1, T2, T3]);
        assert_eq!(rec.ended, 1);
    }

    #[test]
    fn no_departure_hook_before_leaving() {
        let mut d = depot();
        let sim = SimBuilder::from_config(handoff_config()).build(&d.packages).unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut d, SimTime(0.5), &mut rec).unwrap();
        assert_eq!(rec.departures.len(), 1);
        assert_eq!(rec.routes.len(), 3);
    }

    #[test]
    fn package_hook_follows_registry_write() {
        let d = depot();
        let sim = SimBuilder::from_config(handoff_config()).build(&d.packages).unwrap();
        let plans = sim.plan(&d).unwrap();

        // P1 is planned but absent here, so its status write fails.
        let mut partial = PackageRegistry::from_packages([
            Package::new(PackageId(2), "B"),
            Package::new(PackageId(3), "C"),
        ])
        .unwrap();
        let mut rec = Recorder::default();
        let err = sim.simulate(&plans, &mut partial, SimTime(2.5), &mut rec).unwrap_err();

        assert_eq!(err, SimError::Data(DataError::PackageNotFound(PackageId(1))));
        assert!(rec.packages.is_empty());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn ranks(depot: &Depot) -> Vec<u8> {
        (1..=4).map(|id| status(depot, id).rank()).collect()
    }

    proptest! {
        #[test]
        fn status_never_regresses(a in 0.0f64..8.0, b in 0.0f64..8.0) {
            let (early, late) = if a <= b { (a, b) } else { (b, a) };
            let config = handoff_config().with_batch(batch(T4, &[4], DeparturePolicy::AfterReturn));
            let mut d = depot();
            let sim = SimBuilder::from_config(config).build(&d.packages).unwrap();
            let plans = sim.plan(&d).unwrap();

            let first = sim.simulate(&plans, &mut d.packages, SimTime(early), &mut NoopObserver).unwrap();
            let before = ranks(&d);
            let second = sim.simulate(&plans, &mut d.packages, SimTime(late), &mut NoopObserver).unwrap();
            let after = ranks(&d);

            for (x, y) in before.iter().zip(&after) {
                prop_assert!(x <= y);
            }
            prop_assert!(first.delivered <= second.delivered);
            prop_assert!(first.miles_traveled <= second.miles_traveled + 1e-9);
            for r in &second.results {
                prop_assert!(r.traveled >= 0.0 && r.traveled <= r.length);
                prop_assert_eq!(r.completed, r.route_end.is_some());
            }
        }
    }
}
