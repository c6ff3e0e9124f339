use crate::{
    AssignmentError, AssignmentId, BerthId, DockingWindow, ShipId, UserId,
    error::assignment_error::{DepartureBeforeArrivalSnafu, InvalidStatusTransitionSnafu},
    intervals_overlap,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AssignmentStatus {
    Scheduled,
    Arrived,
    Departed,
    Cancelled,
}

/// A reservation of a berth for a ship over `[eta, etd)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BerthAssignment {
    pub id: AssignmentId,
    pub ship_id: ShipId,
    pub berth_id: BerthId,
    pub eta: DateTime<Utc>,
    pub etd: DateTime<Utc>,
    pub status: AssignmentStatus,
    pub actual_arrival: Option<DateTime<Utc>>,
    pub actual_departure: Option<DateTime<Utc>>,
    pub created_by: UserId,
    /// Created through a manual override that skipped collision detection.
    pub overridden: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBerthAssignment {
    pub ship_id: ShipId,
    pub berth_id: BerthId,
    pub window: DockingWindow,
    pub created_by: UserId,
    pub overridden: bool,
}

impl BerthAssignment {
    /// The interval this assignment keeps the berth occupied, `None` if it no longer blocks
    /// anything.
    ///
    /// Scheduled and arrived assignments block their planned window regardless of delays.
    /// Departed assignments block the window they actually occupied, which extends past the
    /// planned departure on overstays and ends early if the ship left early.
    pub fn blocking_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match self.status {
            AssignmentStatus::Scheduled | AssignmentStatus::Arrived => Some((self.eta, self.etd)),
            AssignmentStatus::Departed => {
                let start = self.actual_arrival.unwrap_or(self.eta);
                let end = self.actual_departure.unwrap_or(self.etd);
                (start < end).then_some((start, end))
            }
            AssignmentStatus::Cancelled => None,
        }
    }

    pub fn blocks(&self, window: &DockingWindow) -> bool {
        self.blocking_window()
            .is_some_and(|(start, end)| intervals_overlap(start, end, window.eta(), window.etd()))
    }

    pub fn mark_arrived(&mut self, at: DateTime<Utc>) -> Result<(), AssignmentError> {
        self.transition(AssignmentStatus::Scheduled, AssignmentStatus::Arrived)?;
        self.actual_arrival = Some(at);
        Ok(())
    }

    pub fn mark_departed(&mut self, at: DateTime<Utc>) -> Result<(), AssignmentError> {
        if self.status != AssignmentStatus::Arrived {
            return InvalidStatusTransitionSnafu {
                from: self.status,
                to: AssignmentStatus::Departed,
            }
            .fail();
        }
        let arrival = self.actual_arrival.unwrap_or(self.eta);
        if at <= arrival {
            return DepartureBeforeArrivalSnafu {
                arrival,
                departure: at,
            }
            .fail();
        }
        self.status = AssignmentStatus::Departed;
        self.actual_departure = Some(at);
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), AssignmentError> {
        self.transition(AssignmentStatus::Scheduled, AssignmentStatus::Cancelled)
    }

    fn transition(
        &mut self,
        expected: AssignmentStatus,
        to: AssignmentStatus,
    ) -> Result<(), AssignmentError> {
        if self.status != expected {
            return InvalidStatusTransitionSnafu {
                from: self.status,
                to,
            }
            .fail();
        }
        self.status = to;
        Ok(())
    }
}

/// Whether any of the given assignments keeps its berth occupied during `window`.
pub fn has_collision<'a>(
    assignments: impl IntoIterator<Item = &'a BerthAssignment>,
    window: &DockingWindow,
) -> bool {
    assignments.into_iter().any(|a| a.blocks(window))
}
