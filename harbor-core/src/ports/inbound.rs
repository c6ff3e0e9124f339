use crate::*;
use async_trait::async_trait;

#[async_trait]
pub trait AssignmentInbound: Send + Sync {
    /// Persists a new scheduled assignment.
    ///
    /// Storage that enforces non-overlap itself reports a violation as
    /// [`Error::ReservationConflict`], overridden assignments are exempt.
    async fn add_assignment(&self, assignment: NewBerthAssignment) -> Result<BerthAssignment>;
    async fn update_assignment(&self, assignment: &BerthAssignment) -> Result<()>;
}

#[async_trait]
pub trait DockingRequestInbound: Send + Sync {
    async fn add_docking_request(&self, request: NewDockingRequest) -> Result<DockingRequest>;
    /// Stores a status change, only if the stored request is still pending.
    ///
    /// Fails with [`Error::StaleRequest`] when the request was processed in the meantime.
    async fn update_docking_request(&self, request: &DockingRequest) -> Result<()>;
}

#[async_trait]
pub trait ShipInbound: Send + Sync {
    async fn add_ship(&self, ship: NewShip) -> Result<Ship>;
    async fn update_ship(&self, ship: &Ship) -> Result<()>;
}
