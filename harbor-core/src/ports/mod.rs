mod inbound;
mod outbound;

pub use inbound::*;
pub use outbound::*;

/// Everything the allocator needs from storage.
pub trait AllocationStorage:
    ShipOutbound + BerthOutbound + AssignmentOutbound + AssignmentInbound + Send + Sync + 'static
{
}

impl<T> AllocationStorage for T where
    T: ShipOutbound + BerthOutbound + AssignmentOutbound + AssignmentInbound + Send + Sync + 'static
{
}

/// Everything the request lifecycle needs from storage on top of allocation.
pub trait RequestStorage:
    AllocationStorage + DockingRequestOutbound + DockingRequestInbound
{
}

impl<T> RequestStorage for T where
    T: AllocationStorage + DockingRequestOutbound + DockingRequestInbound
{
}

/// The full set of ports a storage adapter implements.
pub trait HarborStorage: RequestStorage + MultiplierOutbound + ShipInbound {}

impl<T> HarborStorage for T where T: RequestStorage + MultiplierOutbound + ShipInbound {}
