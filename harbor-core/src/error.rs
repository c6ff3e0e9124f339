use crate::{
    AssignmentId, AssignmentStatus, BerthId, DockingRequestId, DockingRequestStatus, ShipId,
    UserId,
};
use chrono::{DateTime, Utc};
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by storage adapters through the ports.
#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Storage operation failed"))]
    Storage {
        #[snafu(implicit)]
        location: Location,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[snafu(display("Reservation on berth '{berth_id}' overlaps an existing reservation"))]
    ReservationConflict {
        #[snafu(implicit)]
        location: Location,
        berth_id: BerthId,
    },
    #[snafu(display("Docking request '{request_id}' is no longer pending in storage"))]
    StaleRequest {
        #[snafu(implicit)]
        location: Location,
        request_id: DockingRequestId,
    },
    #[snafu(display("Could not find {entity} '{id}' in storage"))]
    Missing {
        #[snafu(implicit)]
        location: Location,
        entity: &'static str,
        id: i64,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum ValidationError {
    #[snafu(display("Ship name cannot be empty"))]
    EmptyName {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Ship registry number cannot be empty"))]
    EmptyRegistryNumber {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Ship length '{value}' must be within (0, {max}] meters"))]
    Length {
        #[snafu(implicit)]
        location: Location,
        value: f64,
        max: f64,
    },
    #[snafu(display("Ship draft '{value}' must be within (0, {max}] meters"))]
    Draft {
        #[snafu(implicit)]
        location: Location,
        value: f64,
        max: f64,
    },
    #[snafu(display("Cargo weight '{value}' cannot be negative"))]
    CargoWeight {
        #[snafu(implicit)]
        location: Location,
        value: f64,
    },
    #[snafu(display("Arrival '{eta}' must be before departure '{etd}'"))]
    InvalidWindow {
        #[snafu(implicit)]
        location: Location,
        eta: DateTime<Utc>,
        etd: DateTime<Utc>,
    },
    #[snafu(display("Requested stay of {days} days is outside of [{min}, {max}]"))]
    Duration {
        #[snafu(implicit)]
        location: Location,
        days: i64,
        min: i64,
        max: i64,
    },
    #[snafu(display("Arrival '{eta}' is before the earliest accepted arrival '{earliest}'"))]
    EtaInPast {
        #[snafu(implicit)]
        location: Location,
        eta: DateTime<Utc>,
        earliest: DateTime<Utc>,
    },
    #[snafu(display("Ship '{ship_id}' does not exist"))]
    ShipNotFound {
        #[snafu(implicit)]
        location: Location,
        ship_id: ShipId,
    },
    #[snafu(display("Ship '{ship_id}' is not owned by user '{user_id}'"))]
    NotShipOwner {
        #[snafu(implicit)]
        location: Location,
        ship_id: ShipId,
        user_id: UserId,
    },
    #[snafu(display("Failed a storage operation during validation"))]
    ValidationStorage {
        #[snafu(implicit)]
        location: Location,
        source: Error,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum LifecycleError {
    #[snafu(display("Docking request '{request_id}' does not exist"))]
    RequestNotFound {
        #[snafu(implicit)]
        location: Location,
        request_id: DockingRequestId,
    },
    #[snafu(display("Docking request has already been processed, current status '{current}'"))]
    AlreadyProcessed {
        #[snafu(implicit)]
        location: Location,
        current: DockingRequestStatus,
    },
    #[snafu(display("User '{user_id}' does not own the docking request"))]
    NotOwner {
        #[snafu(implicit)]
        location: Location,
        user_id: UserId,
    },
    #[snafu(display("User '{user_id}' is not permitted to process docking requests"))]
    NotPermitted {
        #[snafu(implicit)]
        location: Location,
        user_id: UserId,
    },
    #[snafu(display("A rejection requires a non-empty reason"))]
    EmptyRejectionReason {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Failed a storage operation during a request transition"))]
    LifecycleStorage {
        #[snafu(implicit)]
        location: Location,
        source: Error,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum AssignmentError {
    #[snafu(display("Berth assignment '{assignment_id}' does not exist"))]
    AssignmentNotFound {
        #[snafu(implicit)]
        location: Location,
        assignment_id: AssignmentId,
    },
    #[snafu(display("Cannot move berth assignment from '{from}' to '{to}'"))]
    InvalidStatusTransition {
        #[snafu(implicit)]
        location: Location,
        from: AssignmentStatus,
        to: AssignmentStatus,
    },
    #[snafu(display("Departure '{departure}' must be after arrival '{arrival}'"))]
    DepartureBeforeArrival {
        #[snafu(implicit)]
        location: Location,
        arrival: DateTime<Utc>,
        departure: DateTime<Utc>,
    },
    #[snafu(display("User '{user_id}' is not permitted to record berth operations"))]
    OperationNotPermitted {
        #[snafu(implicit)]
        location: Location,
        user_id: UserId,
    },
    #[snafu(display("Assignment refers to {entity} '{id}' which does not exist"))]
    DanglingReference {
        #[snafu(implicit)]
        location: Location,
        entity: &'static str,
        id: i64,
    },
    #[snafu(display("Failed a storage operation during a berth operation"))]
    AssignmentStorage {
        #[snafu(implicit)]
        location: Location,
        source: Error,
    },
}

impl Error {
    pub fn is_reservation_conflict(&self) -> bool {
        matches!(self, Error::ReservationConflict { .. })
    }
}
