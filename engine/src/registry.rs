use crate::error::{
    RegistryError,
    registry_error::{
        NotOwnerSnafu, RegistrationNotPermittedSnafu, ShipNotFoundSnafu, StorageSnafu,
        ValidationSnafu,
    },
};
use harbor_core::{
    ActingUser, NewShip, Ship, ShipId, ShipInbound, ShipOutbound, UpdateShip, UserRole,
};
use snafu::{OptionExt, ResultExt};
use std::sync::Arc;
use tracing::{info, instrument};

pub trait FleetStorage: ShipOutbound + ShipInbound {}

impl<T> FleetStorage for T where T: ShipOutbound + ShipInbound {}

#[derive(Clone)]
pub struct FleetRegistry {
    adapter: Arc<dyn FleetStorage>,
}

impl FleetRegistry {
    pub fn new(adapter: Arc<dyn FleetStorage>) -> Self {
        Self { adapter }
    }

    /// Ship owners register ships for themselves, operators and above for any owner.
    #[instrument(skip(self, ship), fields(user_id = %user.id, owner_id = %ship.owner_id))]
    pub async fn register_ship(
        &self,
        user: ActingUser,
        ship: NewShip,
    ) -> Result<Ship, RegistryError> {
        if user.role == UserRole::ShipOwner && ship.owner_id != user.id {
            return RegistrationNotPermittedSnafu {
                user_id: user.id,
                owner_id: ship.owner_id,
            }
            .fail();
        }
        ship.validate().context(ValidationSnafu)?;

        let ship = self.adapter.add_ship(ship).await.context(StorageSnafu)?;

        info!(ship_id = %ship.id, ship_type = %ship.ship_type, "ship registered");
        Ok(ship)
    }

    /// Only the owner may edit a ship.
    #[instrument(skip(self, update), fields(user_id = %user.id))]
    pub async fn update_ship(
        &self,
        user: ActingUser,
        ship_id: ShipId,
        update: UpdateShip,
    ) -> Result<Ship, RegistryError> {
        let mut ship = self
            .adapter
            .ship(ship_id)
            .await
            .context(StorageSnafu)?
            .context(ShipNotFoundSnafu { ship_id })?;

        if !ship.is_owned_by(user.id) {
            return NotOwnerSnafu {
                ship_id,
                user_id: user.id,
            }
            .fail();
        }

        ship.apply(update).context(ValidationSnafu)?;
        self.adapter
            .update_ship(&ship)
            .await
            .context(StorageSnafu)?;

        info!("ship updated");
        Ok(ship)
    }
}
