use crate::{
    error::error::{MissingSnafu, ReservationConflictSnafu, StaleRequestSnafu, StorageSnafu},
    *,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use snafu::IntoError;
use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::RwLock;

/// In-memory storage implementing every port, with switches to simulate misbehaving storage.
#[derive(Debug)]
pub struct TestStorage {
    state: RwLock<State>,
    enforce_exclusion: AtomicBool,
    stale_overlap_reads: AtomicBool,
    fail_request_updates: AtomicBool,
    fail_assignment_updates: AtomicBool,
}

#[derive(Debug, Default)]
struct State {
    ships: BTreeMap<ShipId, Ship>,
    berths: BTreeMap<BerthId, Berth>,
    assignments: BTreeMap<AssignmentId, BerthAssignment>,
    requests: BTreeMap<DockingRequestId, DockingRequest>,
    tables: MultiplierTables,
    id_counter: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.id_counter += 1;
        self.id_counter
    }
}

impl Default for TestStorage {
    fn default() -> Self {
        TestStorage {
            state: RwLock::new(State::default()),
            enforce_exclusion: AtomicBool::new(true),
            stale_overlap_reads: AtomicBool::new(false),
            fail_request_updates: AtomicBool::new(false),
            fail_assignment_updates: AtomicBool::new(false),
        }
    }
}

impl TestStorage {
    pub fn new() -> TestStorage {
        TestStorage::default()
    }

    /// Whether inserts reject planned windows overlapping another live, non-overridden
    /// assignment on the same berth. Enabled by default.
    pub fn set_enforce_exclusion(&self, value: bool) {
        self.enforce_exclusion.store(value, Ordering::SeqCst);
    }

    /// Makes every overlap query report a free berth.
    pub fn set_stale_overlap_reads(&self, value: bool) {
        self.stale_overlap_reads.store(value, Ordering::SeqCst);
    }

    pub fn set_fail_request_updates(&self, value: bool) {
        self.fail_request_updates.store(value, Ordering::SeqCst);
    }

    pub fn set_fail_assignment_updates(&self, value: bool) {
        self.fail_assignment_updates.store(value, Ordering::SeqCst);
    }

    pub async fn set_multiplier_tables(&self, tables: MultiplierTables) {
        self.state.write().await.tables = tables;
    }

    pub async fn add_berth(&self, berth: NewBerth) -> Berth {
        let mut state = self.state.write().await;
        let id = BerthId::new(state.next_id());
        let NewBerth {
            name,
            max_length,
            max_draft,
            base_rate_per_day,
            is_available,
        } = berth;
        let berth = Berth {
            id,
            name,
            max_length,
            max_draft,
            base_rate_per_day,
            is_available,
        };
        state.berths.insert(id, berth.clone());
        berth
    }

    pub async fn all_assignments(&self) -> Vec<BerthAssignment> {
        self.state
            .read()
            .await
            .assignments
            .values()
            .cloned()
            .collect()
    }

    pub async fn all_docking_requests(&self) -> Vec<DockingRequest> {
        self.state.read().await.requests.values().cloned().collect()
    }
}

fn failure(message: &'static str) -> Error {
    StorageSnafu.into_error(Box::new(std::io::Error::other(message)))
}

#[async_trait]
impl ShipOutbound for TestStorage {
    async fn ship(&self, id: ShipId) -> Result<Option<Ship>> {
        Ok(self.state.read().await.ships.get(&id).cloned())
    }
}

#[async_trait]
impl BerthOutbound for TestStorage {
    async fn berths(&self) -> Result<Vec<Berth>> {
        Ok(self.state.read().await.berths.values().cloned().collect())
    }

    async fn berth(&self, id: BerthId) -> Result<Option<Berth>> {
        Ok(self.state.read().await.berths.get(&id).cloned())
    }
}

#[async_trait]
impl AssignmentOutbound for TestStorage {
    async fn has_overlapping_reservation(
        &self,
        berth_id: BerthId,
        window: &DockingWindow,
    ) -> Result<bool> {
        if self.stale_overlap_reads.load(Ordering::SeqCst) {
            return Ok(false);
        }
        let state = self.state.read().await;
        Ok(has_collision(
            state.assignments.values().filter(|a| a.berth_id == berth_id),
            window,
        ))
    }

    async fn assignment(&self, id: AssignmentId) -> Result<Option<BerthAssignment>> {
        Ok(self.state.read().await.assignments.get(&id).cloned())
    }
}

#[async_trait]
impl AssignmentInbound for TestStorage {
    async fn add_assignment(&self, assignment: NewBerthAssignment) -> Result<BerthAssignment> {
        let mut state = self.state.write().await;

        if !state.berths.contains_key(&assignment.berth_id) {
            return MissingSnafu {
                entity: "berth",
                id: assignment.berth_id.into_inner(),
            }
            .fail();
        }

        let window = assignment.window;
        if self.enforce_exclusion.load(Ordering::SeqCst)
            && !assignment.overridden
            && state.assignments.values().any(|a| {
                a.berth_id == assignment.berth_id
                    && matches!(
                        a.status,
                        AssignmentStatus::Scheduled | AssignmentStatus::Arrived
                    )
                    && !a.overridden
                    && intervals_overlap(a.eta, a.etd, window.eta(), window.etd())
            })
        {
            return ReservationConflictSnafu {
                berth_id: assignment.berth_id,
            }
            .fail();
        }

        let id = AssignmentId::new(state.next_id());
        let stored = BerthAssignment {
            id,
            ship_id: assignment.ship_id,
            berth_id: assignment.berth_id,
            eta: window.eta(),
            etd: window.etd(),
            status: AssignmentStatus::Scheduled,
            actual_arrival: None,
            actual_departure: None,
            created_by: assignment.created_by,
            overridden: assignment.overridden,
            created_at: chrono::Utc::now(),
        };
        state.assignments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_assignment(&self, assignment: &BerthAssignment) -> Result<()> {
        if self.fail_assignment_updates.load(Ordering::SeqCst) {
            return Err(failure("assignment updates are disabled"));
        }

        let mut state = self.state.write().await;
        match state.assignments.get_mut(&assignment.id) {
            Some(stored) => {
                *stored = assignment.clone();
                Ok(())
            }
            None => MissingSnafu {
                entity: "assignment",
                id: assignment.id.into_inner(),
            }
            .fail(),
        }
    }
}

#[async_trait]
impl MultiplierOutbound for TestStorage {
    async fn size_multiplier(&self, length: f64) -> Result<Option<Decimal>> {
        Ok(self.state.read().await.tables.size_multiplier(length))
    }

    async fn type_multiplier(&self, ship_type: ShipType) -> Result<Option<Decimal>> {
        Ok(self.state.read().await.tables.type_multiplier(ship_type))
    }
}

#[async_trait]
impl DockingRequestOutbound for TestStorage {
    async fn docking_request(&self, id: DockingRequestId) -> Result<Option<DockingRequest>> {
        Ok(self.state.read().await.requests.get(&id).cloned())
    }

    async fn pending_docking_requests(&self) -> Result<Vec<DockingRequest>> {
        let state = self.state.read().await;
        let mut pending: Vec<_> = state
            .requests
            .values()
            .filter(|r| r.is_pending())
            .cloned()
            .collect();
        pending.sort_by_key(|r| (r.created_at, r.id));
        Ok(pending)
    }
}

#[async_trait]
impl DockingRequestInbound for TestStorage {
    async fn add_docking_request(&self, request: NewDockingRequest) -> Result<DockingRequest> {
        let mut state = self.state.write().await;
        let id = DockingRequestId::new(state.next_id());
        let stored = DockingRequest {
            id,
            ship_id: request.ship_id,
            owner_id: request.owner_id,
            eta: request.window.eta(),
            etd: request.window.etd(),
            cargo: request.cargo,
            status: DockingRequestStatus::Pending,
            created_at: request.created_at,
            processed_by: None,
            processed_at: None,
            rejection_reason: None,
            assignment_id: None,
        };
        state.requests.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_docking_request(&self, request: &DockingRequest) -> Result<()> {
        if self.fail_request_updates.load(Ordering::SeqCst) {
            return Err(failure("request updates are disabled"));
        }

        let mut state = self.state.write().await;
        match state.requests.get_mut(&request.id) {
            Some(stored) if stored.is_pending() => {
                *stored = request.clone();
                Ok(())
            }
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

#[async_trait]
impl ShipInbound for TestStorage {
    async fn add_ship(&self, ship: NewShip) -> Result<Ship> {
        let mut state = self.state.write().await;
        let id = ShipId::new(state.next_id());
        let NewShip {
            owner_id,
            name,
            registry_number,
            length,
            draft,
            ship_type,
        } = ship;
        let ship = Ship {
            id,
            owner_id,
            name,
            registry_number,
            length,
            draft,
            ship_type,
        };
        state.ships.insert(id, ship.clone());
        Ok(ship)
    }

    async fn update_ship(&self, ship: &Ship) -> Result<()> {
        let mut state = self.state.write().await;
        match state.ships.get_mut(&ship.id) {
            Some(stored) => {
                *stored = ship.clone();
                Ok(())
            }
            None => MissingSnafu {
                entity: "ship",
                id: ship.id.into_inner(),
            }
            .fail(),
        }
    }
}
