use crate::{
    AllocationSettings, Allocator, KeyedLocks,
    error::{
        ApproveError,
        approve_error::{AllocationSnafu, LifecycleSnafu, OrphanedReservationSnafu},
    },
};
use chrono::{Duration, Utc};
use harbor_core::{
    ActingUser, AssignmentError, BerthAssignment, BerthId, DockingRequest, DockingRequestId,
    DockingRequestSubmission, Error as StorageError, LifecycleError, NewDockingRequest,
    RequestStorage, ShipId, SubmissionLimits, ValidationError,
    error::{
        assignment_error::AssignmentStorageSnafu,
        lifecycle_error::{
            AlreadyProcessedSnafu, LifecycleStorageSnafu, NotPermittedSnafu, RequestNotFoundSnafu,
        },
        validation_error::{ShipNotFoundSnafu, ValidationStorageSnafu},
    },
};
use itertools::Itertools;
use snafu::{OptionExt, ResultExt};
use std::{collections::HashMap, sync::Arc};
use tracing::{error, info, instrument, warn};

/// Drives docking requests from `Pending` to one of the terminal states.
///
/// Transitions on the same request are serialised and every stored change is conditional on
/// the stored request still being pending. An approval either ends with an approved request
/// linked to its reservation or leaves the request pending without a reservation.
#[derive(Clone)]
pub struct RequestManager {
    adapter: Arc<dyn RequestStorage>,
    allocator: Allocator,
    request_locks: Arc<KeyedLocks<DockingRequestId>>,
    policy: AllocationSettings,
}

impl RequestManager {
    pub fn new(
        adapter: Arc<dyn RequestStorage>,
        allocator: Allocator,
        policy: AllocationSettings,
    ) -> Self {
        Self {
            adapter,
            allocator,
            request_locks: Default::default(),
            policy,
        }
    }

    #[instrument(skip(self), fields(user_id = %owner.id))]
    pub async fn submit(
        &self,
        owner: ActingUser,
        submission: DockingRequestSubmission,
    ) -> Result<DockingRequest, ValidationError> {
        let ship_id = submission.ship_id;
        let ship = self
            .adapter
            .ship(ship_id)
            .await
            .context(ValidationStorageSnafu)?
            .context(ShipNotFoundSnafu { ship_id })?;

        let now = Utc::now();
        let grace = Duration::from_std(self.policy.submission_grace)
            .unwrap_or_else(|_| Duration::zero());
        let limits = SubmissionLimits {
            earliest_eta: now - grace,
            min_days: self.policy.min_request_days,
            max_days: self.policy.max_request_days,
        };
        let window = submission.validate(owner.id, &ship, &limits)?;

        let request = self
            .adapter
            .add_docking_request(NewDockingRequest {
                owner_id: owner.id,
                ship_id,
                window,
                cargo: submission.cargo,
                created_at: now,
            })
            .await
            .context(ValidationStorageSnafu)?;

        info!(request_id = %request.id, "docking request submitted");
        Ok(request)
    }

    /// Approves the request with a first-fit allocation.
    #[instrument(skip(self), fields(user_id = %approver.id))]
    pub async fn approve(
        &self,
        request_id: DockingRequestId,
        approver: ActingUser,
    ) -> Result<BerthAssignment, ApproveError> {
        self.approve_impl(request_id, approver, None).await
    }

    /// Approves the request with an override allocation on `berth_id`.
    #[instrument(skip(self), fields(user_id = %approver.id))]
    pub async fn approve_with_override(
        &self,
        request_id: DockingRequestId,
        approver: ActingUser,
        berth_id: BerthId,
    ) -> Result<BerthAssignment, ApproveError> {
        self.approve_impl(request_id, approver, Some(berth_id))
            .await
    }

    async fn approve_impl(
        &self,
        request_id: DockingRequestId,
        approver: ActingUser,
        override_berth: Option<BerthId>,
    ) -> Result<BerthAssignment, ApproveError> {
        ensure_processor(approver).context(LifecycleSnafu)?;

        let _guard = self.request_locks.lock(request_id).await;

        let mut request = self.request(request_id).await.context(LifecycleSnafu)?;
        request.ensure_pending().context(LifecycleSnafu)?;

        let assignment = match override_berth {
            None => {
                self.allocator
                    .allocate(request.ship_id, request.eta, request.etd, approver)
                    .await
            }
            Some(berth_id) => {
                self.allocator
                    .allocate_with_override(
                        request.ship_id,
                        request.eta,
                        request.etd,
                        approver,
                        berth_id,
                    )
                    .await
            }
        }
        .context(AllocationSnafu)?;

        let stored = match request.approve(approver.id, assignment.id, Utc::now()) {
            Ok(()) => self.store(&request).await,
            Err(e) => Err(e),
        };

        match stored {
            Ok(()) => {
                info!(
                    %request_id,
                    assignment_id = %assignment.id,
                    berth_id = %assignment.berth_id,
                    "docking request approved"
                );
                Ok(assignment)
            }
            Err(e) => {
                let assignment_id = assignment.id;
                match self.release(assignment).await {
                    Ok(()) => Err(e).context(LifecycleSnafu),
                    Err(release_error) => {
                        error!(
                            %request_id,
                            %assignment_id,
                            "failed to release reservation of failed approval: {release_error:?}"
                        );
                        Err(release_error).context(OrphanedReservationSnafu {
                            assignment_id,
                            link_error: e,
                        })
                    }
                }
            }
        }
    }

    #[instrument(skip(self), fields(user_id = %approver.id))]
    pub async fn reject(
        &self,
        request_id: DockingRequestId,
        approver: ActingUser,
        reason: &str,
    ) -> Result<(), LifecycleError> {
        ensure_processor(approver)?;

        let _guard = self.request_locks.lock(request_id).await;

        let mut request = self.request(request_id).await?;
        request.reject(approver.id, reason, Utc::now())?;
        self.store(&request).await?;

        info!(%request_id, "docking request rejected");
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %owner.id))]
    pub async fn cancel(
        &self,
        request_id: DockingRequestId,
        owner: ActingUser,
    ) -> Result<(), LifecycleError> {
        let _guard = self.request_locks.lock(request_id).await;

        let mut request = self.request(request_id).await?;
        request.cancel(owner.id, Utc::now())?;
        self.store(&request).await?;

        info!(%request_id, "docking request cancelled");
        Ok(())
    }

    /// Pending requests in the order operators should handle them, by ship type priority and
    /// then by submission time.
    #[instrument(skip(self), fields(user_id = %user.id))]
    pub async fn pending_queue(
        &self,
        user: ActingUser,
    ) -> Result<Vec<DockingRequest>, LifecycleError> {
        ensure_processor(user)?;

        let pending = self
            .adapter
            .pending_docking_requests()
            .await
            .context(LifecycleStorageSnafu)?;

        let mut priorities: HashMap<ShipId, u8> = HashMap::new();
        let ship_ids: Vec<ShipId> = pending.iter().map(|r| r.ship_id).unique().collect();
        for ship_id in ship_ids {
            let priority = match self
                .adapter
                .ship(ship_id)
                .await
                .context(LifecycleStorageSnafu)?
            {
                Some(ship) => ship.ship_type.priority(),
                None => {
                    warn!(%ship_id, "pending request refers to a missing ship");
                    u8::MAX
                }
            };
            priorities.insert(ship_id, priority);
        }

        Ok(pending
            .into_iter()
            .sorted_by_key(|r| {
                (
                    priorities.get(&r.ship_id).copied().unwrap_or(u8::MAX),
                    r.created_at,
                    r.id,
                )
            })
            .collect())
    }

    async fn request(
        &self,
        request_id: DockingRequestId,
    ) -> Result<DockingRequest, LifecycleError> {
        self.adapter
            .docking_request(request_id)
            .await
            .context(LifecycleStorageSnafu)?
            .context(RequestNotFoundSnafu { request_id })
    }

    async fn store(&self, request: &DockingRequest) -> Result<(), LifecycleError> {
        match self.adapter.update_docking_request(request).await {
            Ok(()) => Ok(()),
            Err(StorageError::StaleRequest { .. }) => {
                let current = self.request(request.id).await?;
                warn!(
                    request_id = %request.id,
                    current = %current.status,
                    "request was processed concurrently"
                );
                AlreadyProcessedSnafu {
                    current: current.status,
                }
                .fail()
            }
            Err(e) => Err(e).context(LifecycleStorageSnafu),
        }
    }

    /// Cancels a reservation whose request could not be linked to it.
    async fn release(&self, mut assignment: BerthAssignment) -> Result<(), AssignmentError> {
        assignment.cancel()?;
        self.adapter
            .update_assignment(&assignment)
            .await
            .context(AssignmentStorageSnafu)?;

        warn!(
            assignment_id = %assignment.id,
            "released reservation of failed approval"
        );
        Ok(())
    }
}

fn ensure_processor(user: ActingUser) -> Result<(), LifecycleError> {
    if user.can_process_requests() {
        Ok(())
    } else {
        NotPermittedSnafu { user_id: user.id }.fail()
    }
}
