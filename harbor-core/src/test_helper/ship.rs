use super::*;

pub struct ShipBuilder {
    pub state: TestStateBuilder,
    pub current_index: usize,
}

#[derive(Debug, Clone)]
pub struct ShipConstructor {
    pub ship: NewShip,
}

impl ShipBuilder {
    /// Adds `amount` docking requests per ship in the current selection.
    pub fn docking_requests(mut self, amount: usize) -> DockingRequestBuilder {
        assert!(amount != 0);

        let num_ships = self.state.ships.len() - self.current_index;
        let created_at = Utc::now();
        for ship_key in self.current_index..self.state.ships.len() {
            for _ in 0..amount {
                let (eta, etd) = self.state.next_window();
                let submitted = self.state.docking_requests.len() as i64;
                self.state.docking_requests.push(DockingRequestConstructor {
                    ship_key,
                    eta,
                    etd,
                    cargo: None,
                    created_at: created_at + Duration::seconds(submitted),
                });
            }
        }

        DockingRequestBuilder {
            current_index: self.state.docking_requests.len() - amount * num_ships,
            state: self,
        }
    }

    /// Adds `amount` scheduled assignments on the first berth per ship in the current selection.
    pub fn assignments(mut self, amount: usize) -> AssignmentBuilder {
        assert!(amount != 0);
        assert!(
            !self.state.berths.is_empty(),
            "assignments require at least one berth"
        );

        let num_ships = self.state.ships.len() - self.current_index;
        for ship_key in self.current_index..self.state.ships.len() {
            for _ in 0..amount {
                let (eta, etd) = self.state.next_window();
                self.state.assignments.push(AssignmentConstructor {
                    ship_key,
                    berth_key: 0,
                    eta,
                    etd,
                    status: AssignmentStatus::Scheduled,
                    actual_departure: None,
                    overridden: false,
                });
            }
        }

        AssignmentBuilder {
            current_index: self.state.assignments.len() - amount * num_ships,
            state: self,
        }
    }

    pub fn base(self) -> TestStateBuilder {
        self.state
    }

    pub fn ships(self, amount: usize) -> ShipBuilder {
        self.state.ships(amount)
    }

    pub async fn build(self) -> TestState {
        self.state.build().await
    }
}
