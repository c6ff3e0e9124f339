use crate::UserId;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    ShipOwner,
    Operator,
    HarborMaster,
    Admin,
}

/// The user on whose behalf an operation runs, always passed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingUser {
    pub id: UserId,
    pub role: UserRole,
}

impl ActingUser {
    pub fn new(id: impl Into<UserId>, role: UserRole) -> ActingUser {
        ActingUser {
            id: id.into(),
            role,
        }
    }

    /// Whether the user may place a reservation that bypasses collision detection.
    pub fn can_override(&self) -> bool {
        matches!(self.role, UserRole::HarborMaster | UserRole::Admin)
    }

    pub fn can_process_requests(&self) -> bool {
        !matches!(self.role, UserRole::ShipOwner)
    }
}
