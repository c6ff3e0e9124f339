use crate::{PostgresAdapter, error::Result};
use harbor_core::ShipType;
use rust_decimal::Decimal;

impl PostgresAdapter {
    /// Brackets are `(min_length, max_length]`.
    pub(crate) async fn size_multiplier_impl(&self, length: f64) -> Result<Option<Decimal>> {
        let factor = sqlx::query_scalar::<_, Decimal>(
            r#"
SELECT
    factor
FROM
    size_multipliers
WHERE
    $1 > min_length
    AND $1 <= max_length
ORDER BY
    min_length
LIMIT
    1
            "#,
        )
        .bind(length)
        .fetch_optional(&self.pool)
        .await?;

        Ok(factor)
    }

    pub(crate) async fn type_multiplier_impl(&self, ship_type: ShipType) -> Result<Option<Decimal>> {
        let factor = sqlx::query_scalar::<_, Decimal>(
            r#"
SELECT
    factor
FROM
    ship_type_multipliers
WHERE
    ship_type = $1
            "#,
        )
        .bind(ship_type.as_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(factor)
    }
}
