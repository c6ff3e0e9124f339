use chrono::{DateTime, Utc};
use harbor_core::{Berth, MultiplierOutbound, PricingBreakdown, Result, Ship, ceil_days};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Prices stays from the multiplier tables, falling back to the configured defaults for
/// lengths and ship types the tables do not cover.
///
/// Nothing is written, so estimates are safe before any reservation exists.
#[derive(Clone)]
pub struct FeeCalculator {
    adapter: Arc<dyn MultiplierOutbound>,
    default_size_multiplier: Decimal,
    default_type_multiplier: Decimal,
}

impl FeeCalculator {
    pub fn new(
        adapter: Arc<dyn MultiplierOutbound>,
        default_size_multiplier: Decimal,
        default_type_multiplier: Decimal,
    ) -> Self {
        Self {
            adapter,
            default_size_multiplier,
            default_type_multiplier,
        }
    }

    #[instrument(skip(self, berth, ship), fields(berth_id = %berth.id, ship_id = %ship.id))]
    pub async fn estimate_cost(
        &self,
        berth: &Berth,
        ship: &Ship,
        days: i64,
    ) -> Result<PricingBreakdown> {
        let (size_multiplier, type_multiplier) = self.multipliers(ship).await?;
        Ok(PricingBreakdown::compute(
            berth,
            ship.ship_type,
            days,
            size_multiplier,
            type_multiplier,
        ))
    }

    pub async fn compute_actual_cost(
        &self,
        berth: &Berth,
        ship: &Ship,
        arrival: DateTime<Utc>,
        departure: DateTime<Utc>,
    ) -> Result<PricingBreakdown> {
        self.estimate_cost(berth, ship, ceil_days(arrival, departure))
            .await
    }

    async fn multipliers(&self, ship: &Ship) -> Result<(Decimal, Decimal)> {
        let size = match self.adapter.size_multiplier(ship.length).await? {
            Some(v) => v,
            None => {
                debug!(length = ship.length, "no size bracket matched, using default");
                self.default_size_multiplier
            }
        };
        let ship_type = match self.adapter.type_multiplier(ship.ship_type).await? {
            Some(v) => v,
            None => {
                debug!(ship_type = %ship.ship_type, "no type multiplier, using default");
                self.default_type_multiplier
            }
        };
        Ok((size, ship_type))
    }
}
