use super::parse_enum;
use crate::error::Error;
use harbor_core::{ShipId, UserId};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Ship {
    pub ship_id: ShipId,
    pub owner_id: UserId,
    pub name: String,
    pub registry_number: String,
    pub length: f64,
    pub draft: f64,
    pub ship_type: String,
}

impl TryFrom<Ship> for harbor_core::Ship {
    type Error = Error;

    fn try_from(v: Ship) -> Result<Self, Self::Error> {
        let Ship {
            ship_id,
            owner_id,
            name,
            registry_number,
            length,
            draft,
            ship_type,
        } = v;

        Ok(Self {
            id: ship_id,
            owner_id,
            name,
            registry_number,
            length,
            draft,
            ship_type: parse_enum("ship type", ship_type)?,
        })
    }
}
