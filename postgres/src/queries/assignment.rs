use crate::{PostgresAdapter, error::Result, error::is_exclusion_violation, models};
use harbor_core::{
    AssignmentId, AssignmentStatus, BerthAssignment, BerthId, DockingWindow, NewBerthAssignment,
    error::error::{MissingSnafu, ReservationConflictSnafu},
};

impl PostgresAdapter {
    /// Mirrors [`BerthAssignment::blocking_window`]: departed assignments occupy the berth for
    /// the stay that actually happened, cancelled ones never do.
    pub(crate) async fn has_overlapping_reservation_impl(
        &self,
        berth_id: BerthId,
        window: &DockingWindow,
    ) -> Result<bool> {
        let overlaps = sqlx::query_scalar::<_, bool>(
            r#"
SELECT
    EXISTS (
        SELECT
            1
        FROM
            (
                SELECT
                    CASE
                        WHEN status = 'departed' THEN COALESCE(actual_arrival, eta)
                        ELSE eta
                    END AS block_start,
                    CASE
                        WHEN status = 'departed' THEN COALESCE(actual_departure, etd)
                        ELSE etd
                    END AS block_end
                FROM
                    berth_assignments
                WHERE
                    berth_id = $1
                    AND status <> $4
            ) AS b
        WHERE
            b.block_start < b.block_end
            AND b.block_start < $3
            AND $2 < b.block_end
    )
            "#,
        )
        .bind(berth_id)
        .bind(window.eta())
        .bind(window.etd())
        .bind(AssignmentStatus::Cancelled.as_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(overlaps)
    }

    pub(crate) async fn assignment_impl(&self, id: AssignmentId) -> Result<Option<BerthAssignment>> {
        sqlx::query_as::<_, models::BerthAssignment>(
            r#"
SELECT
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
    created_at
FROM
    berth_assignments
WHERE
    berth_assignment_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(BerthAssignment::try_from)
        .transpose()
    }

    /// A violated `berth_assignments_no_overlap` constraint becomes a reservation conflict.
    pub(crate) async fn add_assignment_impl(
        &self,
        assignment: NewBerthAssignment,
    ) -> harbor_core::Result<BerthAssignment> {
        let NewBerthAssignment {
            ship_id,
            berth_id,
            window,
            created_by,
            overridden,
        } = assignment;

        let row = sqlx::query_as::<_, models::BerthAssignment>(
            r#"
INSERT INTO
    berth_assignments (
        ship_id,
        berth_id,
        eta,
        etd,
        status,
        created_by,
        overridden
    )
VALUES
    ($1, $2, $3, $4, $5, $6, $7)
RETURNING
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
    created_at
            "#,
        )
        .bind(ship_id)
        .bind(berth_id)
        .bind(window.eta())
        .bind(window.etd())
        .bind(AssignmentStatus::Scheduled.as_ref())
        .bind(created_by)
        .bind(overridden)
        .fetch_one(&self.pool)
        .await;

        match row {
            Ok(row) => Ok(BerthAssignment::try_from(row)?),
            Err(e) if is_exclusion_violation(&e) => ReservationConflictSnafu { berth_id }.fail(),
            Err(e) => Err(crate::Error::from(e).into()),
        }
    }

    pub(crate) async fn update_assignment_impl(
        &self,
        assignment: &BerthAssignment,
    ) -> harbor_core::Result<()> {
        let result = sqlx::query(
            r#"
UPDATE berth_assignments
SET
    status = $2,
    actual_arrival = $3,
    actual_departure = $4
WHERE
    berth_assignment_id = $1
            "#,
        )
        .bind(assignment.id)
        .bind(assignment.status.as_ref())
        .bind(assignment.actual_arrival)
        .bind(assignment.actual_departure)
        .execute(&self.pool)
        .await
        .map_err(crate::Error::from)?;

        if result.rows_affected() == 0 {
            return MissingSnafu {
                entity: "berth assignment",
                id: assignment.id.into_inner(),
            }
            .fail();
        }
        Ok(())
    }
}
