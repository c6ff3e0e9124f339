use super::*;

pub struct BerthBuilder {
    pub state: TestStateBuilder,
    pub current_index: usize,
}

#[derive(Debug, Clone)]
pub struct BerthConstructor {
    pub berth: NewBerth,
}

impl BerthBuilder {
    pub fn base(self) -> TestStateBuilder {
        self.state
    }

    pub fn berths(self, amount: usize) -> BerthBuilder {
        self.state.berths(amount)
    }

    pub fn ships(self, amount: usize) -> ShipBuilder {
        self.state.ships(amount)
    }

    pub async fn build(self) -> TestState {
        self.state.build().await
    }
}
