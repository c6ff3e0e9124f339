use crate::{
    KeyedLocks,
    error::allocation_error::{
        AllFullSnafu, BerthNotFoundSnafu, BerthUnsuitableSnafu, DurationExceededSnafu,
        InvalidWindowSnafu, NoSuitableBerthSnafu, OverrideNotPermittedSnafu, ShipNotFoundSnafu,
        StorageSnafu,
    },
    error::AllocationError,
};
use chrono::{DateTime, Utc};
use harbor_core::{
    ActingUser, AllocationStorage, Berth, BerthAssignment, BerthId, DockingWindow,
    NewBerthAssignment, Ship, ShipId, suitable_berths,
};
use snafu::{OptionExt, ResultExt};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

type Result<T> = std::result::Result<T, AllocationError>;

/// First-fit berth allocation.
///
/// Candidate berths are tried in ascending id order and the first one without a colliding
/// reservation is taken. The check and the insert for a berth run under an exclusive lock on
/// that berth, and a conflict reported by the storage on insert is treated like a collision.
#[derive(Clone)]
pub struct Allocator {
    adapter: Arc<dyn AllocationStorage>,
    berth_locks: Arc<KeyedLocks<BerthId>>,
}

impl Allocator {
    pub fn new(adapter: Arc<dyn AllocationStorage>) -> Self {
        Self {
            adapter,
            berth_locks: Default::default(),
        }
    }

    #[instrument(skip(self), fields(user_id = %user.id))]
    pub async fn allocate(
        &self,
        ship_id: ShipId,
        eta: DateTime<Utc>,
        etd: DateTime<Utc>,
        user: ActingUser,
    ) -> Result<BerthAssignment> {
        let window = DockingWindow::new(eta, etd).context(InvalidWindowSnafu)?;
        let ship = self.ship(ship_id).await?;

        let berths = self.adapter.berths().await.context(StorageSnafu)?;
        let candidates = suitable_berths(berths, ship.length, ship.draft);
        if candidates.is_empty() {
            return NoSuitableBerthSnafu {
                ship_id,
                length: ship.length,
                draft: ship.draft,
            }
            .fail();
        }

        check_duration(&ship, &window)?;

        for berth in candidates {
            if let Some(assignment) = self.try_reserve(&berth, &ship, &window, user).await? {
                return Ok(assignment);
            }
        }

        let overridable = user.can_override();
        info!(overridable, "all suitable berths are reserved");
        AllFullSnafu { overridable }.fail()
    }

    /// Reserves `berth_id` without consulting existing reservations.
    ///
    /// Only users with override capability may do this, and the berth still has to be able to
    /// host the ship.
    #[instrument(skip(self), fields(user_id = %user.id))]
    pub async fn allocate_with_override(
        &self,
        ship_id: ShipId,
        eta: DateTime<Utc>,
        etd: DateTime<Utc>,
        user: ActingUser,
        berth_id: BerthId,
    ) -> Result<BerthAssignment> {
        if !user.can_override() {
            return OverrideNotPermittedSnafu { user_id: user.id }.fail();
        }

        let window = DockingWindow::new(eta, etd).context(InvalidWindowSnafu)?;
        let ship = self.ship(ship_id).await?;

        let berth = self
            .adapter
            .berth(berth_id)
            .await
            .context(StorageSnafu)?
            .context(BerthNotFoundSnafu { berth_id })?;

        if !berth.is_suitable_for(ship.length, ship.draft) {
            return BerthUnsuitableSnafu { berth_id, ship_id }.fail();
        }

        check_duration(&ship, &window)?;

        let _guard = self.berth_locks.lock(berth_id).await;

        let assignment = self
            .adapter
            .add_assignment(NewBerthAssignment {
                ship_id,
                berth_id,
                window,
                created_by: user.id,
                overridden: true,
            })
            .await
            .context(StorageSnafu)?;

        warn!(
            assignment_id = %assignment.id,
            %berth_id,
            "reservation placed by override"
        );

        Ok(assignment)
    }

    async fn try_reserve(
        &self,
        berth: &Berth,
        ship: &Ship,
        window: &DockingWindow,
        user: ActingUser,
    ) -> Result<Option<BerthAssignment>> {
        let _guard = self.berth_locks.lock(berth.id).await;

        if self
            .adapter
            .has_overlapping_reservation(berth.id, window)
            .await
            .context(StorageSnafu)?
        {
            debug!(berth_id = %berth.id, "berth is reserved during the window");
            return Ok(None);
        }

        let new = NewBerthAssignment {
            ship_id: ship.id,
            berth_id: berth.id,
            window: *window,
            created_by: user.id,
            overridden: false,
        };

        match self.adapter.add_assignment(new).await {
            Ok(assignment) => {
                info!(
                    assignment_id = %assignment.id,
                    berth_id = %berth.id,
                    "berth allocated"
                );
                Ok(Some(assignment))
            }
            Err(e) if e.is_reservation_conflict() => {
                warn!(berth_id = %berth.id, "storage rejected an overlapping reservation");
                Ok(None)
            }
            Err(e) => Err(e).context(StorageSnafu),
        }
    }

    async fn ship(&self, ship_id: ShipId) -> Result<Ship> {
        self.adapter
            .ship(ship_id)
            .await
            .context(StorageSnafu)?
            .context(ShipNotFoundSnafu { ship_id })
    }
}

fn check_duration(ship: &Ship, window: &DockingWindow) -> Result<()> {
    let requested_days = window.days();
    let max_days = ship.ship_type.max_docking_days();
    if requested_days > max_days {
        DurationExceededSnafu {
            ship_type: ship.ship_type,
            requested_days,
            max_days,
        }
        .fail()
    } else {
        Ok(())
    }
}
