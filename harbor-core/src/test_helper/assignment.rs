use super::*;

pub struct AssignmentBuilder {
    pub state: ShipBuilder,
    pub current_index: usize,
}

#[derive(Debug, Clone)]
pub struct AssignmentConstructor {
    /// Index into the ships added by the builder.
    pub ship_key: usize,
    /// Index into the berths added by the builder.
    pub berth_key: usize,
    pub eta: DateTime<Utc>,
    pub etd: DateTime<Utc>,
    /// Assignments are inserted as scheduled and then moved forward to this status.
    pub status: AssignmentStatus,
    /// Only used for departed assignments, defaults to `etd`.
    pub actual_departure: Option<DateTime<Utc>>,
    pub overridden: bool,
}

impl AssignmentBuilder {
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
