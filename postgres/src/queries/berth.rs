use crate::{PostgresAdapter, error::Result, models};
use harbor_core::{Berth, BerthId};

impl PostgresAdapter {
    pub(crate) async fn berths_impl(&self) -> Result<Vec<Berth>> {
        let berths = sqlx::query_as::<_, models::Berth>(
            r#"
SELECT
    berth_id,
    name,
    max_length,
    max_draft,
    base_rate_per_day,
    is_available
FROM
    berths
ORDER BY
    berth_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(berths.into_iter().map(Berth::from).collect())
    }

    pub(crate) async fn berth_impl(&self, id: BerthId) -> Result<Option<Berth>> {
        let berth = sqlx::query_as::<_, models::Berth>(
            r#"
SELECT
    berth_id,
    name,
    max_length,
    max_draft,
    base_rate_per_day,
    is_available
FROM
    berths
WHERE
    berth_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(berth.map(Berth::from))
    }
}
