use super::*;

pub struct DockingRequestBuilder {
    pub state: ShipBuilder,
    pub current_index: usize,
}

#[derive(Debug, Clone)]
pub struct DockingRequestConstructor {
    /// Index into the ships added by the builder.
    pub ship_key: usize,
    pub eta: DateTime<Utc>,
    pub etd: DateTime<Utc>,
    pub cargo: Option<CargoInfo>,
    pub created_at: DateTime<Utc>,
}

impl DockingRequestBuilder {
    pub fn up(self) -> ShipBuilder {
        self.state
    }

    pub fn base(self) -> TestStateBuilder {
        self.state.state
    }

    pub async fn build(self) -> TestState {
        self.base().build().await
    }
}
