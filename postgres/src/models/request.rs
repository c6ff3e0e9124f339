use super::parse_enum;
use crate::error::Error;
use chrono::{DateTime, Utc};
use harbor_core::{AssignmentId, CargoInfo, DockingRequestId, ShipId, UserId};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DockingRequest {
    pub docking_request_id: DockingRequestId,
    pub ship_id: ShipId,
    pub owner_id: UserId,
    pub eta: DateTime<Utc>,
    pub etd: DateTime<Utc>,
    pub cargo_description: Option<String>,
    pub cargo_weight_tonnes: Option<f64>,
    pub cargo_hazardous: Option<bool>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub processed_by: Option<UserId>,
    pub processed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub berth_assignment_id: Option<AssignmentId>,
}

impl TryFrom<DockingRequest> for harbor_core::DockingRequest {
    type Error = Error;

    fn try_from(v: DockingRequest) -> Result<Self, Self::Error> {
        let DockingRequest {
            docking_request_id,
            ship_id,
            owner_id,
            eta,
            etd,
            cargo_description,
            cargo_weight_tonnes,
            cargo_hazardous,
            status,
            created_at,
            processed_by,
            processed_at,
            rejection_reason,
            berth_assignment_id,
        } = v;

        // Cargo is stored flattened, the description marks its presence.
        let cargo = cargo_description.map(|description| CargoInfo {
            description,
            weight_tonnes: cargo_weight_tonnes,
            hazardous: cargo_hazardous.unwrap_or(false),
        });

        Ok(Self {
            id: docking_request_id,
            ship_id,
            owner_id,
            eta,
            etd,
            cargo,
            status: parse_enum("docking request status", status)?,
            created_at,
            processed_by,
            processed_at,
            rejection_reason,
            assignment_id: berth_assignment_id,
        })
    }
}
