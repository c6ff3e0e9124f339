use crate::{Berth, ShipType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Derived cost of a stay, recomputed on every request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub base_rate: Decimal,
    pub days: i64,
    pub size_multiplier: Decimal,
    pub type_multiplier: Decimal,
    pub special_fee: Decimal,
    pub docking_cost: Decimal,
    pub total_cost: Decimal,
}

impl PricingBreakdown {
    /// Prices `days` (at least one) on `berth` with already resolved multipliers.
    pub fn compute(
        berth: &Berth,
        ship_type: ShipType,
        days: i64,
        size_multiplier: Decimal,
        type_multiplier: Decimal,
    ) -> PricingBreakdown {
        let days = days.max(1);
        let docking_cost =
            berth.base_rate_per_day * Decimal::from(days) * size_multiplier * type_multiplier;
        let special_fee = ship_type.surcharge();

        PricingBreakdown {
            base_rate: berth.base_rate_per_day,
            days,
            size_multiplier,
            type_multiplier,
            special_fee,
            docking_cost,
            total_cost: docking_cost + special_fee,
        }
    }
}

/// A length bracket `(min_length, max_length]` in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeBracket {
    pub min_length: f64,
    pub max_length: f64,
    pub factor: Decimal,
}

impl SizeBracket {
    pub fn contains(&self, length: f64) -> bool {
        length > self.min_length && length <= self.max_length
    }
}

/// Reference multiplier tables, also the seed data of persistent storage.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplierTables {
    pub size_brackets: Vec<SizeBracket>,
    pub type_factors: HashMap<ShipType, Decimal>,
}

impl MultiplierTables {
    pub fn size_multiplier(&self, length: f64) -> Option<Decimal> {
        self.size_brackets
            .iter()
            .find(|b| b.contains(length))
            .map(|b| b.factor)
    }

    pub fn type_multiplier(&self, ship_type: ShipType) -> Option<Decimal> {
        self.type_factors.get(&ship_type).copied()
    }
}

impl Default for MultiplierTables {
    fn default() -> Self {
        let bracket = |min_length, max_length, factor| SizeBracket {
            min_length,
            max_length,
            factor,
        };

        MultiplierTables {
            size_brackets: vec![
                bracket(0.0, 100.0, dec!(1.00)),
                bracket(100.0, 200.0, dec!(1.25)),
                bracket(200.0, 300.0, dec!(1.50)),
                bracket(300.0, 500.0, dec!(2.00)),
            ],
            type_factors: HashMap::from([
                (ShipType::Container, dec!(1.20)),
                (ShipType::Tanker, dec!(1.50)),
                (ShipType::BulkCarrier, dec!(1.30)),
                (ShipType::GeneralCargo, dec!(1.00)),
                (ShipType::Passenger, dec!(1.10)),
            ]),
        }
    }
}
