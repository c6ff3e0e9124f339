use harbor_core::BerthId;
use rust_decimal::Decimal;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Berth {
    pub berth_id: BerthId,
    pub name: String,
    pub max_length: f64,
    pub max_draft: f64,
    pub base_rate_per_day: Decimal,
    pub is_available: bool,
}

impl From<Berth> for harbor_core::Berth {
    fn from(v: Berth) -> Self {
        let Berth {
            berth_id,
            name,
            max_length,
            max_draft,
            base_rate_per_day,
            is_available,
        } = v;

        Self {
            id: berth_id,
            name,
            max_length,
            max_draft,
            base_rate_per_day,
            is_available,
        }
    }
}
