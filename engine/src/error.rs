use harbor_core::{
    AssignmentError, AssignmentId, BerthId, LifecycleError, ShipId, ShipType, UserId,
    ValidationError,
};
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to set up the postgres adapter"))]
    Postgres {
        #[snafu(implicit)]
        location: Location,
        source: postgres::Error,
    },
}

/// Outcomes of an allocation attempt that did not produce a reservation.
#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum AllocationError {
    #[snafu(display("Invalid docking window"))]
    InvalidWindow {
        #[snafu(implicit)]
        location: Location,
        source: ValidationError,
    },
    #[snafu(display("Ship '{ship_id}' does not exist"))]
    ShipNotFound {
        #[snafu(implicit)]
        location: Location,
        ship_id: ShipId,
    },
    #[snafu(display(
        "No available berth can host ship '{ship_id}' with length '{length}' and draft '{draft}'"
    ))]
    NoSuitableBerth {
        #[snafu(implicit)]
        location: Location,
        ship_id: ShipId,
        length: f64,
        draft: f64,
    },
    #[snafu(display(
        "A stay of {requested_days} days exceeds the {max_days} day limit for '{ship_type}' ships"
    ))]
    DurationExceeded {
        #[snafu(implicit)]
        location: Location,
        ship_type: ShipType,
        requested_days: i64,
        max_days: i64,
    },
    #[snafu(display("All suitable berths are reserved, overridable: '{overridable}'"))]
    AllFull {
        #[snafu(implicit)]
        location: Location,
        overridable: bool,
    },
    #[snafu(display("User '{user_id}' may not override berth reservations"))]
    OverrideNotPermitted {
        #[snafu(implicit)]
        location: Location,
        user_id: UserId,
    },
    #[snafu(display("Berth '{berth_id}' does not exist"))]
    BerthNotFound {
        #[snafu(implicit)]
        location: Location,
        berth_id: BerthId,
    },
    #[snafu(display("Berth '{berth_id}' cannot host ship '{ship_id}'"))]
    BerthUnsuitable {
        #[snafu(implicit)]
        location: Location,
        berth_id: BerthId,
        ship_id: ShipId,
    },
    #[snafu(display("Failed a storage operation during allocation"))]
    Storage {
        #[snafu(implicit)]
        location: Location,
        source: harbor_core::Error,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum ApproveError {
    #[snafu(display("Could not allocate a berth for the request"))]
    Allocation {
        #[snafu(implicit)]
        location: Location,
        source: AllocationError,
    },
    #[snafu(display("Request could not be approved"))]
    Lifecycle {
        #[snafu(implicit)]
        location: Location,
        source: LifecycleError,
    },
    /// The request stayed pending while its reservation is still live on the berth.
    #[snafu(display(
        "Request could not be approved ({link_error}), reservation '{assignment_id}' is still live"
    ))]
    OrphanedReservation {
        #[snafu(implicit)]
        location: Location,
        assignment_id: AssignmentId,
        link_error: LifecycleError,
        source: AssignmentError,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum RegistryError {
    #[snafu(display("Invalid ship data"))]
    Validation {
        #[snafu(implicit)]
        location: Location,
        source: ValidationError,
    },
    #[snafu(display("Ship '{ship_id}' does not exist"))]
    ShipNotFound {
        #[snafu(implicit)]
        location: Location,
        ship_id: ShipId,
    },
    #[snafu(display("User '{user_id}' does not own ship '{ship_id}'"))]
    NotOwner {
        #[snafu(implicit)]
        location: Location,
        ship_id: ShipId,
        user_id: UserId,
    },
    #[snafu(display("User '{user_id}' may not register ships for user '{owner_id}'"))]
    RegistrationNotPermitted {
        #[snafu(implicit)]
        location: Location,
        user_id: UserId,
        owner_id: UserId,
    },
    #[snafu(display("Failed a storage operation in the fleet registry"))]
    Storage {
        #[snafu(implicit)]
        location: Location,
        source: harbor_core::Error,
    },
}

impl AllocationError {
    /// Whether the failure can be resolved by a manual override from the requesting user.
    pub fn is_overridable(&self) -> bool {
        matches!(
            self,
            AllocationError::AllFull {
                overridable: true,
                ..
            }
        )
    }
}
