use crate::{
    PsqlLogStatements, PsqlSettings,
    error::{
        Result,
        error::{ConnectionSnafu, MigrationSnafu},
    },
};
use async_trait::async_trait;
use harbor_core::*;
use rust_decimal::Decimal;
use snafu::ResultExt;
use sqlx::{
    ConnectOptions, PgPool,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct PostgresAdapter {
    pub(crate) pool: PgPool,
}

impl PostgresAdapter {
    pub async fn new(settings: &PsqlSettings) -> Result<PostgresAdapter> {
        let mut opts = PgConnectOptions::new()
            .username(&settings.username)
            .host(&settings.ip)
            .port(settings.port);

        if let Some(password) = &settings.password {
            opts = opts.password(password);
        }

        if let Some(db_name) = &settings.db_name {
            opts = opts.database(db_name);
        }

        if let Some(application_name) = &settings.application_name {
            opts = opts.application_name(application_name);
        }

        if let Some(root_cert_path) = &settings.root_cert {
            opts = opts
                .ssl_root_cert(root_cert_path)
                .ssl_mode(PgSslMode::VerifyFull);
        }

        if settings.log_statements == PsqlLogStatements::Disable {
            opts = opts.disable_statement_logging();
        }

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections.max(1))
            .connect_with(opts)
            .await
            .context(ConnectionSnafu)?;

        Ok(PostgresAdapter { pool })
    }

    #[instrument(skip_all)]
    pub async fn do_migrations(&self) -> Result<()> {
        sqlx::migrate!()
            .set_ignore_missing(true)
            .run(&self.pool)
            .await
            .context(MigrationSnafu)
    }
}

#[async_trait]
impl ShipOutbound for PostgresAdapter {
    async fn ship(&self, id: ShipId) -> harbor_core::Result<Option<Ship>> {
        Ok(self.ship_impl(id).await?)
    }
}

#[async_trait]
impl ShipInbound for PostgresAdapter {
    async fn add_ship(&self, ship: NewShip) -> harbor_core::Result<Ship> {
        Ok(self.add_ship_impl(ship).await?)
    }

    async fn update_ship(&self, ship: &Ship) -> harbor_core::Result<()> {
        self.update_ship_impl(ship).await
    }
}

#[async_trait]
impl BerthOutbound for PostgresAdapter {
    async fn berths(&self) -> harbor_core::Result<Vec<Berth>> {
        Ok(self.berths_impl().await?)
    }

    async fn berth(&self, id: BerthId) -> harbor_core::Result<Option<Berth>> {
        Ok(self.berth_impl(id).await?)
    }
}

#[async_trait]
impl AssignmentOutbound for PostgresAdapter {
    async fn has_overlapping_reservation(
        &self,
        berth_id: BerthId,
        window: &DockingWindow,
    ) -> harbor_core::Result<bool> {
        Ok(self.has_overlapping_reservation_impl(berth_id, window).await?)
    }

    async fn assignment(&self, id: AssignmentId) -> harbor_core::Result<Option<BerthAssignment>> {
        Ok(self.assignment_impl(id).await?)
    }
}

#[async_trait]
impl AssignmentInbound for PostgresAdapter {
    async fn add_assignment(
        &self,
        assignment: NewBerthAssignment,
    ) -> harbor_core::Result<BerthAssignment> {
        self.add_assignment_impl(assignment).await
    }

    async fn update_assignment(&self, assignment: &BerthAssignment) -> harbor_core::Result<()> {
        self.update_assignment_impl(assignment).await
    }
}

#[async_trait]
impl MultiplierOutbound for PostgresAdapter {
    async fn size_multiplier(&self, length: f64) -> harbor_core::Result<Option<Decimal>> {
        Ok(self.size_multiplier_impl(length).await?)
    }

    async fn type_multiplier(&self, ship_type: ShipType) -> harbor_core::Result<Option<Decimal>> {
        Ok(self.type_multiplier_impl(ship_type).await?)
    }
}

#[async_trait]
impl DockingRequestOutbound for PostgresAdapter {
    async fn docking_request(
        &self,
        id: DockingRequestId,
    ) -> harbor_core::Result<Option<DockingRequest>> {
        Ok(self.docking_request_impl(id).await?)
    }

    async fn pending_docking_requests(&self) -> harbor_core::Result<Vec<DockingRequest>> {
        Ok(self.pending_docking_requests_impl().await?)
    }
}

#[async_trait]
impl DockingRequestInbound for PostgresAdapter {
    async fn add_docking_request(
        &self,
        request: NewDockingRequest,
    ) -> harbor_core::Result<DockingRequest> {
        Ok(self.add_docking_request_impl(request).await?)
    }

    async fn update_docking_request(&self, request: &DockingRequest) -> harbor_core::Result<()> {
        self.update_docking_request_impl(request).await
    }
}
