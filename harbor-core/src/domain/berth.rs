use crate::BerthId;
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Berth {
    pub id: BerthId,
    pub name: String,
    /// Meters.
    pub max_length: f64,
    /// Meters.
    pub max_draft: f64,
    pub base_rate_per_day: Decimal,
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBerth {
    pub name: String,
    pub max_length: f64,
    pub max_draft: f64,
    pub base_rate_per_day: Decimal,
    pub is_available: bool,
}

impl Berth {
    /// Physical fit only, availability is not considered.
    pub fn can_host(&self, length: f64, draft: f64) -> bool {
        length <= self.max_length && draft <= self.max_draft
    }

    pub fn is_suitable_for(&self, length: f64, draft: f64) -> bool {
        self.is_available && self.can_host(length, draft)
    }
}

/// Returns the available berths able to host a ship of the given dimensions, ordered by
/// ascending berth id.
pub fn suitable_berths(
    berths: impl IntoIterator<Item = Berth>,
    length: f64,
    draft: f64,
) -> Vec<Berth> {
    berths
        .into_iter()
        .filter(|b| b.is_suitable_for(length, draft))
        .sorted_by_key(|b| b.id)
        .collect()
}

#[cfg(any(test, feature = "test"))]
impl NewBerth {
    pub fn test_default() -> NewBerth {
        use rust_decimal_macros::dec;

        NewBerth {
            name: "Quay".into(),
            max_length: 200.0,
            max_draft: 15.0,
            base_rate_per_day: dec!(500000),
            is_available: true,
        }
    }
}
