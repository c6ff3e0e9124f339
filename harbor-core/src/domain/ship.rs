use crate::{
    ShipId, UserId, ValidationError,
    error::validation_error::{DraftSnafu, EmptyNameSnafu, EmptyRegistryNumberSnafu, LengthSnafu},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub const MAX_SHIP_LENGTH: f64 = 500.0;
pub const MAX_SHIP_DRAFT: f64 = 30.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShipType {
    Container,
    Tanker,
    BulkCarrier,
    GeneralCargo,
    Passenger,
}

/// Type specific handling rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipTypeProfile {
    /// Flat fee added on top of the docking cost.
    pub surcharge: Decimal,
    /// Lower value is served first.
    pub priority: u8,
    pub max_docking_days: i64,
    pub required_services: &'static [&'static str],
}

impl ShipType {
    pub fn profile(&self) -> ShipTypeProfile {
        match self {
            ShipType::Container => ShipTypeProfile {
                surcharge: dec!(250000),
                priority: 3,
                max_docking_days: 21,
                required_services: &["crane operations", "container yard"],
            },
            ShipType::Tanker => ShipTypeProfile {
                surcharge: dec!(1500000),
                priority: 2,
                max_docking_days: 14,
                required_services: &["hazmat handling", "fire watch", "pipeline connection"],
            },
            ShipType::BulkCarrier => ShipTypeProfile {
                surcharge: dec!(500000),
                priority: 4,
                max_docking_days: 30,
                required_services: &["bulk handling equipment"],
            },
            ShipType::GeneralCargo => ShipTypeProfile {
                surcharge: Decimal::ZERO,
                priority: 5,
                max_docking_days: 30,
                required_services: &["general stevedoring"],
            },
            ShipType::Passenger => ShipTypeProfile {
                surcharge: dec!(750000),
                priority: 1,
                max_docking_days: 3,
                required_services: &["passenger terminal", "customs and immigration"],
            },
        }
    }

    pub fn surcharge(&self) -> Decimal {
        self.profile().surcharge
    }

    pub fn max_docking_days(&self) -> i64 {
        self.profile().max_docking_days
    }

    pub fn priority(&self) -> u8 {
        self.profile().priority
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub owner_id: UserId,
    pub name: String,
    pub registry_number: String,
    /// Meters.
    pub length: f64,
    /// Meters.
    pub draft: f64,
    pub ship_type: ShipType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShip {
    pub owner_id: UserId,
    pub name: String,
    pub registry_number: String,
    pub length: f64,
    pub draft: f64,
    pub ship_type: ShipType,
}

/// Owner edit of a ship, `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateShip {
    pub name: Option<String>,
    pub registry_number: Option<String>,
    pub length: Option<f64>,
    pub draft: Option<f64>,
    pub ship_type: Option<ShipType>,
}

impl NewShip {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_ship(&self.name, &self.registry_number, self.length, self.draft)
    }
}

impl Ship {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Applies the update and validates the result, the ship is left untouched on error.
    pub fn apply(&mut self, update: UpdateShip) -> Result<(), ValidationError> {
        let UpdateShip {
            name,
            registry_number,
            length,
            draft,
            ship_type,
        } = update;

        let mut updated = self.clone();
        if let Some(name) = name {
            updated.name = name;
        }
        if let Some(registry_number) = registry_number {
            updated.registry_number = registry_number;
        }
        if let Some(length) = length {
            updated.length = length;
        }
        if let Some(draft) = draft {
            updated.draft = draft;
        }
        if let Some(ship_type) = ship_type {
            updated.ship_type = ship_type;
        }

        validate_ship(
            &updated.name,
            &updated.registry_number,
            updated.length,
            updated.draft,
        )?;

        *self = updated;
        Ok(())
    }
}

fn validate_ship(
    name: &str,
    registry_number: &str,
    length: f64,
    draft: f64,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return EmptyNameSnafu.fail();
    }
    if registry_number.trim().is_empty() {
        return EmptyRegistryNumberSnafu.fail();
    }
    // Written as negated range checks so NaN is rejected as well.
    if !(length > 0.0 && length <= MAX_SHIP_LENGTH) {
        return LengthSnafu {
            value: length,
            max: MAX_SHIP_LENGTH,
        }
        .fail();
    }
    if !(draft > 0.0 && draft <= MAX_SHIP_DRAFT) {
        return DraftSnafu {
            value: draft,
            max: MAX_SHIP_DRAFT,
        }
        .fail();
    }
    Ok(())
}

#[cfg(any(test, feature = "test"))]
impl NewShip {
    pub fn test_default(owner_id: UserId) -> NewShip {
        NewShip {
            owner_id,
            name: "MV Test Carrier".into(),
            registry_number: "IMO9000001".into(),
            length: 180.0,
            draft: 10.0,
            ship_type: ShipType::Container,
        }
    }
}
