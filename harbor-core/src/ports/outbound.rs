use crate::*;
use async_trait::async_trait;
use rust_decimal::Decimal;

#[async_trait]
pub trait ShipOutbound: Send + Sync {
    async fn ship(&self, id: ShipId) -> Result<Option<Ship>>;
}

#[async_trait]
pub trait BerthOutbound: Send + Sync {
    async fn berths(&self) -> Result<Vec<Berth>>;
    async fn berth(&self, id: BerthId) -> Result<Option<Berth>>;
}

#[async_trait]
pub trait AssignmentOutbound: Send + Sync {
    /// Whether any assignment on `berth_id` keeps the berth occupied during `window`.
    async fn has_overlapping_reservation(
        &self,
        berth_id: BerthId,
        window: &DockingWindow,
    ) -> Result<bool>;
    async fn assignment(&self, id: AssignmentId) -> Result<Option<BerthAssignment>>;
}

#[async_trait]
pub trait MultiplierOutbound: Send + Sync {
    async fn size_multiplier(&self, length: f64) -> Result<Option<Decimal>>;
    async fn type_multiplier(&self, ship_type: ShipType) -> Result<Option<Decimal>>;
}

#[async_trait]
pub trait DockingRequestOutbound: Send + Sync {
    async fn docking_request(&self, id: DockingRequestId) -> Result<Option<DockingRequest>>;
    /// Pending requests in submission order.
    async fn pending_docking_requests(&self) -> Result<Vec<DockingRequest>>;
}
