use crate::*;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;

mod assignment;
mod berth;
mod levels;
mod request;
mod ship;
mod storage;

pub use assignment::*;
pub use berth::*;
pub use levels::*;
pub use request::*;
pub use ship::*;
pub use storage::*;

#[derive(Debug)]
pub struct TestState {
    /// Ordered by ascending berth id.
    pub berths: Vec<Berth>,
    pub ships: Vec<Ship>,
    pub assignments: Vec<BerthAssignment>,
    pub docking_requests: Vec<DockingRequest>,
}

pub struct TestStateBuilder {
    storage: Arc<TestStorage>,
    berths: Vec<BerthConstructor>,
    ships: Vec<ShipConstructor>,
    assignments: Vec<AssignmentConstructor>,
    docking_requests: Vec<DockingRequestConstructor>,
    // Used for berth names, ship names, registry numbers and owner ids
    counter: i64,
    window_timestamp_counter: DateTime<Utc>,
    default_stay: Duration,
    window_gap: Duration,
}

impl TestStateBuilder {
    pub fn new(storage: Arc<TestStorage>) -> TestStateBuilder {
        TestStateBuilder {
            storage,
            berths: vec![],
            ships: vec![],
            assignments: vec![],
            docking_requests: vec![],
            counter: 1,
            window_timestamp_counter: Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
            default_stay: Duration::days(2),
            window_gap: Duration::days(1),
        }
    }

    /// Start of the first generated docking window.
    pub fn window_start(mut self, time: DateTime<Utc>) -> TestStateBuilder {
        self.window_timestamp_counter = time;
        self
    }

    pub fn stay_duration(mut self, duration: Duration) -> TestStateBuilder {
        self.default_stay = duration;
        self
    }

    pub fn berths(mut self, amount: usize) -> BerthBuilder {
        assert!(amount != 0);

        for _ in 0..amount {
            let mut berth = NewBerth::test_default();
            berth.name = format!("Quay {}", self.counter);
            self.counter += 1;
            self.berths.push(BerthConstructor { berth });
        }

        BerthBuilder {
            current_index: self.berths.len() - amount,
            state: self,
        }
    }

    pub fn ships(mut self, amount: usize) -> ShipBuilder {
        assert!(amount != 0);

        for _ in 0..amount {
            let mut ship = NewShip::test_default(UserId::new(1000 + self.counter));
            ship.name = format!("MV Test {}", self.counter);
            ship.registry_number = format!("IMO{}", 9_000_000 + self.counter);
            self.counter += 1;
            self.ships.push(ShipConstructor { ship });
        }

        ShipBuilder {
            current_index: self.ships.len() - amount,
            state: self,
        }
    }

    fn next_window(&mut self) -> (DateTime<Utc>, DateTime<Utc>) {
        let eta = self.window_timestamp_counter;
        let etd = eta + self.default_stay;
        self.window_timestamp_counter = etd + self.window_gap;
        (eta, etd)
    }

    pub async fn build(self) -> TestState {
        let mut berths = Vec::with_capacity(self.berths.len());
        for b in self.berths {
            berths.push(self.storage.add_berth(b.berth).await);
        }

        let mut ships = Vec::with_capacity(self.ships.len());
        for s in self.ships {
            ships.push(self.storage.add_ship(s.ship).await.unwrap());
        }

        let mut assignments = Vec::with_capacity(self.assignments.len());
        for a in self.assignments {
            let ship = &ships[a.ship_key];
            let berth = &berths[a.berth_key];
            let mut assignment = self
                .storage
                .add_assignment(NewBerthAssignment {
                    ship_id: ship.id,
                    berth_id: berth.id,
                    window: DockingWindow::new(a.eta, a.etd).unwrap(),
                    created_by: ship.owner_id,
                    overridden: a.overridden,
                })
                .await
                .unwrap();

            match a.status {
                AssignmentStatus::Scheduled => {}
                AssignmentStatus::Arrived => assignment.mark_arrived(a.eta).unwrap(),
                AssignmentStatus::Departed => {
                    assignment.mark_arrived(a.eta).unwrap();
                    assignment.mark_departed(a.actual_departure.unwrap_or(a.etd)).unwrap();
                }
                AssignmentStatus::Cancelled => assignment.cancel().unwrap(),
            }
            self.storage.update_assignment(&assignment).await.unwrap();
            assignments.push(assignment);
        }

        let mut docking_requests = Vec::with_capacity(self.docking_requests.len());
        for r in self.docking_requests {
            let ship = &ships[r.ship_key];
            docking_requests.push(
                self.storage
                    .add_docking_request(NewDockingRequest {
                        owner_id: ship.owner_id,
                        ship_id: ship.id,
                        window: DockingWindow::new(r.eta, r.etd).unwrap(),
                        cargo: r.cargo,
                        created_at: r.created_at,
                    })
                    .await
                    .unwrap(),
            );
        }

        TestState {
            berths,
            ships,
            assignments,
            docking_requests,
        }
    }
}
