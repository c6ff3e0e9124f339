use crate::{PostgresAdapter, error::Result, models};
use harbor_core::{
    DockingRequest, DockingRequestId, DockingRequestStatus, NewDockingRequest,
    error::error::{MissingSnafu, StaleRequestSnafu},
};

impl PostgresAdapter {
    pub(crate) async fn docking_request_impl(
        &self,
        id: DockingRequestId,
    ) -> Result<Option<DockingRequest>> {
        sqlx::query_as::<_, models::DockingRequest>(
            r#"
SELECT
    docking_request_id,
    ship_id,
    owner_id,
    eta,
    etd,
    cargo_description,
    cargo_weight_tonnes,
    cargo_hazardous,
    status,
    created_at,
    processed_by,
    processed_at,
    rejection_reason,
    berth_assignment_id
FROM
    docking_requests
WHERE
    docking_request_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(DockingRequest::try_from)
        .transpose()
    }

    pub(crate) async fn pending_docking_requests_impl(&self) -> Result<Vec<DockingRequest>> {
        sqlx::query_as::<_, models::DockingRequest>(
            r#"
SELECT
    docking_request_id,
    ship_id,
    owner_id,
    eta,
    etd,
    cargo_description,
    cargo_weight_tonnes,
    cargo_hazardous,
    status,
    created_at,
    processed_by,
    processed_at,
    rejection_reason,
    berth_assignment_id
FROM
    docking_requests
WHERE
    status = $1
ORDER BY
    created_at,
    docking_request_id
            "#,
        )
        .bind(DockingRequestStatus::Pending.as_ref())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(DockingRequest::try_from)
        .collect()
    }

    pub(crate) async fn add_docking_request_impl(
        &self,
        request: NewDockingRequest,
    ) -> Result<DockingRequest> {
        let NewDockingRequest {
            owner_id,
            ship_id,
            window,
            cargo,
            created_at,
        } = request;

        let row = sqlx::query_as::<_, models::DockingRequest>(
            r#"
INSERT INTO
    docking_requests (
        ship_id,
        owner_id,
        eta,
        etd,
        cargo_description,
        cargo_weight_tonnes,
        cargo_hazardous,
        status,
        created_at
    )
VALUES
    ($1, $2, $3, $4, $5, $6, $7, $8, $9)
RETURNING
    docking_request_id,
    ship_id,
    owner_id,
    eta,
    etd,
    cargo_description,
    cargo_weight_tonnes,
    cargo_hazardous,
    status,
    created_at,
    processed_by,
    processed_at,
    rejection_reason,
    berth_assignment_id
            "#,
        )
        .bind(ship_id)
        .bind(owner_id)
        .bind(window.eta())
        .bind(window.etd())
        .bind(cargo.as_ref().map(|c| c.description.as_str()))
        .bind(cargo.as_ref().and_then(|c| c.weight_tonnes))
        .bind(cargo.as_ref().map(|c| c.hazardous))
        .bind(DockingRequestStatus::Pending.as_ref())
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        DockingRequest::try_from(row)
    }

    /// Only a request that is still pending in storage is updated.
    pub(crate) async fn update_docking_request_impl(
        &self,
        request: &DockingRequest,
    ) -> harbor_core::Result<()> {
        let result = sqlx::query(
            r#"
UPDATE docking_requests
SET
    status = $2,
    processed_by = $3,
    processed_at = $4,
    rejection_reason = $5,
    berth_assignment_id = $6
WHERE
    docking_request_id = $1
    AND status = $7
            "#,
        )
        .bind(request.id)
        .bind(request.status.as_ref())
        .bind(request.processed_by)
        .bind(request.processed_at)
        .bind(request.rejection_reason.as_deref())
        .bind(request.assignment_id)
        .bind(DockingRequestStatus::Pending.as_ref())
        .execute(&self.pool)
        .await
        .map_err(crate::Error::from)?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        match self.docking_request_impl(request.id).await? {
            Some(_) => StaleRequestSnafu {
                request_id: request.id,
            }
            .fail(),
            None => MissingSnafu {
                entity: "docking request",
                id: request.id.into_inner(),
            }
            .fail(),
        }
    }
}
