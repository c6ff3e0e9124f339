use crate::{FeeCalculator, KeyedLocks};
use chrono::{DateTime, Utc};
use harbor_core::{
    ActingUser, AllocationStorage, AssignmentError, AssignmentId, BerthAssignment,
    PricingBreakdown,
    error::assignment_error::{
        AssignmentNotFoundSnafu, AssignmentStorageSnafu, DanglingReferenceSnafu,
        OperationNotPermittedSnafu,
    },
};
use snafu::{OptionExt, ResultExt};
use std::sync::Arc;
use tracing::{info, instrument};

type Result<T> = std::result::Result<T, AssignmentError>;

/// Records the operational events of a reservation.
#[derive(Clone)]
pub struct AssignmentTracker {
    adapter: Arc<dyn AllocationStorage>,
    fees: FeeCalculator,
    assignment_locks: Arc<KeyedLocks<AssignmentId>>,
}

impl AssignmentTracker {
    pub fn new(adapter: Arc<dyn AllocationStorage>, fees: FeeCalculator) -> Self {
        Self {
            adapter,
            fees,
            assignment_locks: Default::default(),
        }
    }

    #[instrument(skip(self), fields(user_id = %user.id))]
    pub async fn mark_arrived(
        &self,
        assignment_id: AssignmentId,
        at: DateTime<Utc>,
        user: ActingUser,
    ) -> Result<BerthAssignment> {
        ensure_operator(user)?;
        let _guard = self.assignment_locks.lock(assignment_id).await;

        let mut assignment = self.assignment(assignment_id).await?;
        assignment.mark_arrived(at)?;
        self.store(&assignment).await?;

        info!(berth_id = %assignment.berth_id, "ship arrived");
        Ok(assignment)
    }

    /// Records the departure and returns the cost of the stay as it actually happened.
    #[instrument(skip(self), fields(user_id = %user.id))]
    pub async fn mark_departed(
        &self,
        assignment_id: AssignmentId,
        at: DateTime<Utc>,
        user: ActingUser,
    ) -> Result<PricingBreakdown> {
        ensure_operator(user)?;
        let _guard = self.assignment_locks.lock(assignment_id).await;

        let mut assignment = self.assignment(assignment_id).await?;
        assignment.mark_departed(at)?;

        let berth = self
            .adapter
            .berth(assignment.berth_id)
            .await
            .context(AssignmentStorageSnafu)?
            .context(DanglingReferenceSnafu {
                entity: "berth",
                id: assignment.berth_id.into_inner(),
            })?;
        let ship = self
            .adapter
            .ship(assignment.ship_id)
            .await
            .context(AssignmentStorageSnafu)?
            .context(DanglingReferenceSnafu {
                entity: "ship",
                id: assignment.ship_id.into_inner(),
            })?;

        // Both are set by `mark_departed`.
        let arrival = assignment.actual_arrival.unwrap_or(assignment.eta);
        let departure = assignment.actual_departure.unwrap_or(at);

        let cost = self
            .fees
            .compute_actual_cost(&berth, &ship, arrival, departure)
            .await
            .context(AssignmentStorageSnafu)?;

        self.store(&assignment).await?;

        info!(
            berth_id = %assignment.berth_id,
            days = cost.days,
            total_cost = %cost.total_cost,
            "ship departed"
        );
        Ok(cost)
    }

    #[instrument(skip(self), fields(user_id = %user.id))]
    pub async fn cancel_assignment(
        &self,
        assignment_id: AssignmentId,
        user: ActingUser,
    ) -> Result<()> {
        ensure_operator(user)?;
        let _guard = self.assignment_locks.lock(assignment_id).await;

        let mut assignment = self.assignment(assignment_id).await?;
        assignment.cancel()?;
        self.store(&assignment).await?;

        info!(berth_id = %assignment.berth_id, "reservation cancelled");
        Ok(())
    }

    async fn assignment(&self, assignment_id: AssignmentId) -> Result<BerthAssignment> {
        self.adapter
            .assignment(assignment_id)
            .await
            .context(AssignmentStorageSnafu)?
            .context(AssignmentNotFoundSnafu { assignment_id })
    }

    async fn store(&self, assignment: &BerthAssignment) -> Result<()> {
        self.adapter
            .update_assignment(assignment)
            .await
            .context(AssignmentStorageSnafu)
    }
}

fn ensure_operator(user: ActingUser) -> Result<()> {
    if user.can_process_requests() {
        Ok(())
    } else {
        OperationNotPermittedSnafu { user_id: user.id }.fail()
    }
}
