use super::parse_enum;
use crate::error::Error;
use chrono::{DateTime, Utc};
use harbor_core::{AssignmentId, BerthId, ShipId, UserId};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BerthAssignment {
    pub berth_assignment_id: AssignmentId,
    pub ship_id: ShipId,
    pub berth_id: BerthId,
    pub eta: DateTime<Utc>,
    pub etd: DateTime<Utc>,
    pub status: String,
    pub actual_arrival: Option<DateTime<Utc>>,
    pub actual_departure: Option<DateTime<Utc>>,
    pub created_by: UserId,
    pub overridden: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BerthAssignment> for harbor_core::BerthAssignment {
    type Error = Error;

    fn try_from(v: BerthAssignment) -> Result<Self, Self::Error> {
        let BerthAssignment {
            berth_assignment_id,
            ship_id,
            berth_id,
            eta,
            etd,
            status,
            actual_arrival,
            actual_departure,
            created_by,
            overridden,
            created_at,
        } = v;

        Ok(Self {
            id: berth_assignment_id,
            ship_id,
            berth_id,
            eta,
            etd,
            status: parse_enum("assignment status", status)?,
            actual_arrival,
            actual_departure,
            created_by,
            overridden,
            created_at,
        })
    }
}
