use crate::{ValidationError, error::validation_error::InvalidWindowSnafu};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A half-open reservation window `[eta, etd)`, guaranteed to satisfy `eta < etd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockingWindow {
    eta: DateTime<Utc>,
    etd: DateTime<Utc>,
}

impl DockingWindow {
    pub fn new(eta: DateTime<Utc>, etd: DateTime<Utc>) -> Result<DockingWindow, ValidationError> {
        if eta >= etd {
            InvalidWindowSnafu { eta, etd }.fail()
        } else {
            Ok(DockingWindow { eta, etd })
        }
    }

    pub fn eta(&self) -> DateTime<Utc> {
        self.eta
    }

    pub fn etd(&self) -> DateTime<Utc> {
        self.etd
    }

    /// Number of started days covered by the window.
    pub fn days(&self) -> i64 {
        ceil_days(self.eta, self.etd)
    }

    pub fn overlaps(&self, other: &DockingWindow) -> bool {
        intervals_overlap(self.eta, self.etd, other.eta, other.etd)
    }
}

/// `[a_start, a_end)` and `[b_start, b_end)` overlap iff `a_start < b_end && b_start < a_end`.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whole days between `start` and `end`, rounded up. Non-positive spans yield 0.
pub fn ceil_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    }
}
