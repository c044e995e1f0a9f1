//! Package record and its derived delivery status.

use std::fmt;

use hs_core::{PackageId, SimTime};

// ── Carrier ───────────────────────────────────────────────────────────────────

/// The truck a package left the hub on, and the driver at the wheel.
///
/// For first-wave batches the two are the same.  A batch that waits for a
/// returning driver records that driver's original truck in `driver`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Carrier {
    pub truck:  String,
    pub driver: String,
}

impl Carrier {
    /// A truck driven by its own driver.
    pub fn new(truck: impl Into<String>) -> Self {
        let truck = truck.into();
        Self { driver: truck.clone(), truck }
    }

    /// A truck taken out by the driver who first drove `driver`.
    pub fn handoff(truck: impl Into<String>, driver: impl Into<String>) -> Self {
        Self { truck: truck.into(), driver: driver.into() }
    }

    #[inline]
    pub fn is_handoff(&self) -> bool {
        self.truck != self.driver
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_handoff() {
            write!(f, "{} (driver of {})", self.truck, self.driver)
        } else {
            f.write_str(&self.truck)
        }
    }
}

// ── DeliveryStatus ────────────────────────────────────────────────────────────

/// Where a package is at the simulated "now".
///
/// The timestamp exists only once delivered and the carrier only once the
/// package has left the hub, so neither can be set out of step with the
/// state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DeliveryStatus {
    #[default]
    AtHub,
    InTransit { carrier: Carrier },
    Delivered { at: SimTime, carrier: Carrier },
}

impl DeliveryStatus {
    /// 0 = at hub, 1 = in transit, 2 = delivered.  Never decreases as "now"
    /// advances for a fixed route and departure.
    #[inline]
    pub fn rank(&self) -> u8 {
        match self {
            DeliveryStatus::AtHub => 0,
            DeliveryStatus::InTransit { .. } => 1,
            DeliveryStatus::Delivered { .. } => 2,
        }
    }

    #[inline]
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered { .. })
    }

    pub fn carrier(&self) -> Option<&Carrier> {
        match self {
            DeliveryStatus::AtHub => None,
            DeliveryStatus::InTransit { carrier } | DeliveryStatus::Delivered { carrier, .. } => {
                Some(carrier)
            }
        }
    }

    pub fn delivered_at(&self) -> Option<SimTime> {
        match self {
            DeliveryStatus::Delivered { at, .. } => Some(*at),
            _ => None,
        }
    }
}

// ── Package ───────────────────────────────────────────────────────────────────

/// One row of the package dataset plus its mutable delivery status.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub id:           PackageId,
    pub address:      String,
    pub city:         String,
    pub state:        String,
    pub zipcode:      String,
    /// `SimTime::END_OF_DAY` when the package has no deadline.
    pub deadline:     SimTime,
    /// Earliest time the package is at the hub and can be loaded.
    pub available_at: SimTime,
    pub mass:         f64,
    pub status:       DeliveryStatus,
}

impl Package {
    /// A package at the hub, available from day start, with no deadline.
    pub fn new(id: PackageId, address: impl Into<String>) -> Self {
        Self {
            id,
            address:      address.into(),
            city:         String::new(),
            state:        String::new(),
            zipcode:      String::new(),
            deadline:     SimTime::END_OF_DAY,
            available_at: SimTime::START_OF_DAY,
            mass:         0.0,
            status:       DeliveryStatus::AtHub,
        }
    }

    pub fn with_deadline(mut self, deadline: SimTime) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_availability(mut self, available_at: SimTime) -> Self {
        self.available_at = available_at;
        self
    }

    #[inline]
    pub fn has_deadline(&self) -> bool {
        !self.deadline.is_end_of_day()
    }

    /// `true` when the package was delivered after its deadline.
    pub fn is_late(&self) -> bool {
        self.status
            .delivered_at()
            .is_some_and(|at| at > self.deadline)
    }
}
