//! Simulation time model.
//!
//! # Design
//!
//! Time is a fractional number of hours since the start of the delivery day.
//! The mapping to a wall-clock reading is held in `DayClock`:
//!
//!   clock_minutes = start_minutes + hours * 60
//!
//! Hours keep the distance/speed arithmetic direct: a truck at 18 mph that
//! left at `SimTime(1.0)` has covered `18 * (t - 1.0)` miles at `t`.  Two sentinels cover the data's open-ended values:
//! [`SimTime::END_OF_DAY`] for packages without a deadline and
//! [`SimTime::START_OF_DAY`] for packages available from the start.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── SimTime ──────────────────────────────────────────────────────────────────

/// Hours elapsed since the start of the delivery day.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimTime(pub f64);

impl SimTime {
    /// Day start; also the "available from the beginning" sentinel (`BOD`).
    pub const START_OF_DAY: SimTime = SimTime(0.0);

    /// Maximal deadline for packages without one (`EOD`).  Sorts after every
    /// real clock reading.
    pub const END_OF_DAY: SimTime = SimTime(f64::MAX);

    #[inline]
    pub fn from_hours(hours: f64) -> Self {
        SimTime(hours)
    }

    #[inline]
    pub fn from_minutes(minutes: f64) -> Self {
        SimTime(minutes / 60.0)
    }

    #[inline]
    pub fn hours(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_end_of_day(self) -> bool {
        self.0 >= f64::MAX
    }

    /// The later of two times.
    #[inline]
    pub fn max(self, other: SimTime) -> SimTime {
        if other.0 > self.0 { other } else { self }
    }

    /// The earlier of two times.
    #[inline]
    pub fn min(self, other: SimTime) -> SimTime {
        if other.0 < self.0 { other } else { self }
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, hours: f64) -> SimTime {
        SimTime(self.0 + hours)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    /// Hours between two times.
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end_of_day() {
            f.write_str("EOD")
        } else {
            write!(f, "{:.3}h", self.0)
        }
    }
}

// ── DayClock ─────────────────────────────────────────────────────────────────

/// Converts between `SimTime` and 12-hour clock strings such as `"10:30 AM"`.
///
/// `DayClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayClock {
    /// Minutes after midnight at which `SimTime(0.0)` falls.  Default: 480
    /// (8:00 AM).
    pub start_minutes: u32,
}

impl Default for DayClock {
    fn default() -> Self {
        Self { start_minutes: 8 * 60 }
    }
}

impl DayClock {
    pub fn new(start_minutes: u32) -> Self {
        Self { start_minutes }
    }

    /// Parse a clock reading into hours since day start.
    ///
    /// Accepts `H:MM AM`/`H:MM PM` (case-insensitive, space optional) and,
    /// without a suffix, 24-hour `HH:MM`.
    pub fn parse(&self, s: &str) -> CoreResult<SimTime> {
        let minutes = parse_clock_minutes(s).ok_or_else(|| CoreError::InvalidTime(s.to_owned()))?;
        Ok(SimTime::from_minutes(minutes as f64 - self.start_minutes as f64))
    }

    /// Parse a deadline column: a clock reading or `EOD`.
    pub fn parse_deadline(&self, s: &str) -> CoreResult<SimTime> {
        match s.trim() {
            t if t.eq_ignore_ascii_case("EOD") => Ok(SimTime::END_OF_DAY),
            t => self.parse(t),
        }
    }

    /// Parse an availability column: a clock reading, `BOD`, or blank.
    pub fn parse_availability(&self, s: &str) -> CoreResult<SimTime> {
        match s.trim() {
            "" => Ok(SimTime::START_OF_DAY),
            t if t.eq_ignore_ascii_case("BOD") => Ok(SimTime::START_OF_DAY),
            t => self.parse(t),
        }
    }

    /// Render `t` as a 12-hour clock reading, e.g. `"9:05 AM"`.
    ///
    /// Rounds to the nearest minute.  `END_OF_DAY` renders as `"EOD"`.
    pub fn format(&self, t: SimTime) -> String {
        if t.is_end_of_day() {
            return "EOD".to_owned();
        }
        let total = (self.start_minutes as f64 + t.0 * 60.0).round() as i64;
        let total = total.rem_euclid(24 * 60);
        let (hour24, minute) = (total / 60, total % 60);
        let suffix = if hour24 < 12 { "AM" } else { "PM" };
        let hour12 = match hour24 % 12 {
            0 => 12,
            h => h,
        };
        format!("{hour12}:{minute:02} {suffix}")
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Minutes after midnight for a clock string, or `None` if malformed.
fn parse_clock_minutes(s: &str) -> Option<u32> {
    let s = s.trim();
    let upper = s.to_ascii_uppercase();
    let (body, meridiem) = if let Some(b) = upper.strip_suffix("AM") {
        (b.trim_end(), Some(false))
    } else if let Some(b) = upper.strip_suffix("PM") {
        (b.trim_end(), Some(true))
    } else {
        (upper.as_str(), None)
    };

    let (h, m) = body.split_once(':')?;
    if m.len() != 2 {
        return None;
    }
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    if minute > 59 {
        return None;
    }

    let hour24 = match meridiem {
        None if hour <= 23 => hour,
        Some(pm) if (1..=12).contains(&hour) => (hour % 12) + if pm { 12 } else { 0 },
        _ => return None,
    };
    Some(hour24 * 60 + minute)
}
