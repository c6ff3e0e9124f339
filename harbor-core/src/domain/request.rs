use crate::{
    AssignmentId, DockingRequestId, DockingWindow, LifecycleError, Ship, ShipId, UserId,
    ValidationError,
    error::{
        lifecycle_error::{AlreadyProcessedSnafu, EmptyRejectionReasonSnafu, NotOwnerSnafu},
        validation_error::{CargoWeightSnafu, DurationSnafu, EtaInPastSnafu, NotShipOwnerSnafu},
    },
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DockingRequestStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoInfo {
    pub description: String,
    pub weight_tonnes: Option<f64>,
    pub hazardous: bool,
}

/// What an owner submits, before it has been validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockingRequestSubmission {
    pub ship_id: ShipId,
    pub eta: DateTime<Utc>,
    pub etd: DateTime<Utc>,
    pub cargo: Option<CargoInfo>,
}

/// Bounds a submission has to respect to enter the pending queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionLimits {
    /// Arrivals before this instant are considered back-dated.
    pub earliest_eta: DateTime<Utc>,
    pub min_days: i64,
    pub max_days: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDockingRequest {
    pub owner_id: UserId,
    pub ship_id: ShipId,
    pub window: DockingWindow,
    pub cargo: Option<CargoInfo>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockingRequest {
    pub id: DockingRequestId,
    pub ship_id: ShipId,
    pub owner_id: UserId,
    pub eta: DateTime<Utc>,
    pub etd: DateTime<Utc>,
    pub cargo: Option<CargoInfo>,
    pub status: DockingRequestStatus,
    pub created_at: DateTime<Utc>,
    pub processed_by: Option<UserId>,
    pub processed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub assignment_id: Option<AssignmentId>,
}

impl DockingRequestSubmission {
    /// Validates the submission for `owner` against the ship it refers to.
    pub fn validate(
        &self,
        owner: UserId,
        ship: &Ship,
        limits: &SubmissionLimits,
    ) -> Result<DockingWindow, ValidationError> {
        if !ship.is_owned_by(owner) {
            return NotShipOwnerSnafu {
                ship_id: ship.id,
                user_id: owner,
            }
            .fail();
        }

        let window = DockingWindow::new(self.eta, self.etd)?;

        let days = window.days();
        if days < limits.min_days || days > limits.max_days {
            return DurationSnafu {
                days,
                min: limits.min_days,
                max: limits.max_days,
            }
            .fail();
        }

        if self.eta < limits.earliest_eta {
            return EtaInPastSnafu {
                eta: self.eta,
                earliest: limits.earliest_eta,
            }
            .fail();
        }

        if let Some(weight) = self.cargo.as_ref().and_then(|c| c.weight_tonnes) {
            if !(weight >= 0.0) {
                return CargoWeightSnafu { value: weight }.fail();
            }
        }

        Ok(window)
    }
}

impl DockingRequest {
    pub fn is_pending(&self) -> bool {
        self.status == DockingRequestStatus::Pending
    }

    pub fn ensure_pending(&self) -> Result<(), LifecycleError> {
        if self.is_pending() {
            Ok(())
        } else {
            AlreadyProcessedSnafu {
                current: self.status,
            }
            .fail()
        }
    }

    pub fn approve(
        &mut self,
        approver: UserId,
        assignment_id: AssignmentId,
        at: DateTime<Utc>,
    ) -> Result<(), LifecycleError> {
        self.ensure_pending()?;
        self.status = DockingRequestStatus::Approved;
        self.assignment_id = Some(assignment_id);
        self.processed_by = Some(approver);
        self.processed_at = Some(at);
        Ok(())
    }

    pub fn reject(
        &mut self,
        approver: UserId,
        reason: &str,
        at: DateTime<Utc>,
    ) -> Result<(), LifecycleError> {
        self.ensure_pending()?;
        let reason = reason.trim();
        if reason.is_empty() {
            return EmptyRejectionReasonSnafu.fail();
        }
        self.status = DockingRequestStatus::Rejected;
        self.rejection_reason = Some(reason.to_string());
        self.processed_by = Some(approver);
        self.processed_at = Some(at);
        Ok(())
    }

    /// Ownership is checked before the status.
    pub fn cancel(&mut self, owner: UserId, at: DateTime<Utc>) -> Result<(), LifecycleError> {
        if self.owner_id != owner {
            return NotOwnerSnafu { user_id: owner }.fail();
        }
        self.ensure_pending()?;
        self.status = DockingRequestStatus::Cancelled;
        self.processed_by = Some(owner);
        self.processed_at = Some(at);
        Ok(())
    }
}

#[cfg(any(test, feature = "test"))]
impl DockingRequestSubmission {
    pub fn test_default(ship_id: ShipId, eta: DateTime<Utc>) -> DockingRequestSubmission {
        DockingRequestSubmission {
            ship_id,
            eta,
            etd: eta + chrono::Duration::days(2),
            cargo: Some(CargoInfo {
                description: "Containers".into(),
                weight_tonnes: Some(12000.0),
                hazardous: false,
            }),
        }
    }
}
