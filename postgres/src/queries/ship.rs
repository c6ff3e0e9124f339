use crate::{PostgresAdapter, error::Result, models};
use harbor_core::{NewShip, Ship, ShipId, error::error::MissingSnafu};

impl PostgresAdapter {
    pub(crate) async fn ship_impl(&self, id: ShipId) -> Result<Option<Ship>> {
        sqlx::query_as::<_, models::Ship>(
            r#"
SELECT
    ship_id,
    owner_id,
    name,
    registry_number,
    length,
    draft,
    ship_type
FROM
    ships
WHERE
    ship_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Ship::try_from)
        .transpose()
    }

    pub(crate) async fn add_ship_impl(&self, ship: NewShip) -> Result<Ship> {
        let row = sqlx::query_as::<_, models::Ship>(
            r#"
INSERT INTO
    ships (
        owner_id,
        name,
        registry_number,
        length,
        draft,
        ship_type
    )
VALUES
    ($1, $2, $3, $4, $5, $6)
RETURNING
    ship_id,
    owner_id,
    name,
    registry_number,
    length,
    draft,
    ship_type
            "#,
        )
        .bind(ship.owner_id)
        .bind(&ship.name)
        .bind(&ship.registry_number)
        .bind(ship.length)
        .bind(ship.draft)
        .bind(ship.ship_type.as_ref())
        .fetch_one(&self.pool)
        .await?;

        Ship::try_from(row)
    }

    pub(crate) async fn update_ship_impl(&self, ship: &Ship) -> harbor_core::Result<()> {
        let result = sqlx::query(
            r#"
UPDATE ships
SET
    name = $2,
    registry_number = $3,
    length = $4,
    draft = $5,
    ship_type = $6
WHERE
    ship_id = $1
            "#,
        )
        .bind(ship.id)
        .bind(&ship.name)
        .bind(&ship.registry_number)
        .bind(ship.length)
        .bind(ship.draft)
        .bind(ship.ship_type.as_ref())
        .execute(&self.pool)
        .await
        .map_err(crate::Error::from)?;

        if result.rows_affected() == 0 {
            return MissingSnafu {
                entity: "ship",
                id: ship.id.into_inner(),
            }
            .fail();
        }
        Ok(())
    }
}
