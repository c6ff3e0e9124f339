use crate::{
    AllocationSettings, Allocator, AssignmentTracker, FeeCalculator, FleetRegistry,
    RequestManager, Result, Settings, error::error::PostgresSnafu,
};
use harbor_core::{Environment, HarborStorage};
use postgres::PostgresAdapter;
use snafu::ResultExt;
use std::sync::Arc;
use tracing::info;

/// The engine services wired to a single storage.
#[derive(Clone)]
pub struct App {
    pub allocator: Allocator,
    pub requests: RequestManager,
    pub fees: FeeCalculator,
    pub tracker: AssignmentTracker,
    pub registry: FleetRegistry,
}

impl App {
    pub async fn build(settings: &Settings) -> Result<Self> {
        let postgres = Arc::new(
            PostgresAdapter::new(&settings.postgres)
                .await
                .context(PostgresSnafu)?,
        );

        if settings.environment == Environment::Local {
            postgres.do_migrations().await.context(PostgresSnafu)?;
        }

        info!(environment = %settings.environment, "engine connected to postgres");

        Ok(Self::with_storage(postgres, &settings.allocation))
    }

    pub fn with_storage<S: HarborStorage>(storage: Arc<S>, settings: &AllocationSettings) -> Self {
        let allocator = Allocator::new(storage.clone());
        let fees = FeeCalculator::new(
            storage.clone(),
            settings.default_size_multiplier,
            settings.default_type_multiplier,
        );

        Self {
            requests: RequestManager::new(storage.clone(), allocator.clone(), settings.clone()),
            tracker: AssignmentTracker::new(storage.clone(), fees.clone()),
            registry: FleetRegistry::new(storage),
            allocator,
            fees,
        }
    }
}
