use crate::helper::*;
use chrono::{Duration, Utc};
use engine::*;
use harbor_core::*;

async fn stored_request(helper: &TestHelper, id: DockingRequestId) -> DockingRequest {
    helper
        .storage
        .docking_request(id)
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn test_submit_stores_a_pending_request() {
    test(|helper, builder| async move {
        let state = builder.ships(1).build().await;
        let ship = &state.ships[0];
        let eta = Utc::now() + Duration::days(7);

        let request = helper
            .app
            .requests
            .submit(
                owner(ship.owner_id),
                DockingRequestSubmission::test_default(ship.id, eta),
            )
            .await
            .unwrap();

        assert_eq!(request.status, DockingRequestStatus::Pending);
        assert_eq!(request.owner_id, ship.owner_id);
        assert_eq!(request.eta, eta);
        assert_eq!(request.cargo.as_ref().unwrap().description, "Containers");
        assert!(request.assignment_id.is_none());
        assert_eq!(helper.storage.all_docking_requests().await, vec![request]);
    })
    .await;
}

#[tokio::test]
async fn test_submit_requires_ship_ownership() {
    test(|helper, builder| async move {
        let state = builder.ships(2).build().await;
        let eta = Utc::now() + Duration::days(7);

        let error = helper
            .app
            .requests
            .submit(
                owner(state.ships[1].owner_id),
                DockingRequestSubmission::test_default(state.ships[0].id, eta),
            )
            .await
            .unwrap_err();

        assert!(matches!(error, ValidationError::NotShipOwner { .. }));
        assert!(helper.storage.all_docking_requests().await.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_submit_rejects_arrival_in_the_past() {
    test(|helper, builder| async move {
        let state = builder.ships(1).build().await;
        let ship = &state.ships[0];

        let error = helper
            .app
            .requests
            .submit(
                owner(ship.owner_id),
                DockingRequestSubmission::test_default(ship.id, Utc::now() - Duration::days(1)),
            )
            .await
            .unwrap_err();

        assert!(matches!(error, ValidationError::EtaInPast { .. }));
    })
    .await;
}

#[tokio::test]
async fn test_submit_tolerates_arrival_within_grace_period() {
    test(|helper, builder| async move {
        let state = builder.ships(1).build().await;
        let ship = &state.ships[0];

        let request = helper
            .app
            .requests
            .submit(
                owner(ship.owner_id),
                DockingRequestSubmission::test_default(ship.id, Utc::now() - Duration::minutes(1)),
            )
            .await;

        assert!(request.is_ok());
    })
    .await;
}

#[tokio::test]
async fn test_submit_enforces_configured_stay_limits() {
    let settings = AllocationSettings {
        max_request_days: 10,
        ..Default::default()
    };
    test_with_settings(settings, |helper, builder| async move {
        let state = builder.ships(1).build().await;
        let ship = &state.ships[0];
        let eta = Utc::now() + Duration::days(7);

        let mut submission = DockingRequestSubmission::test_default(ship.id, eta);
        submission.etd = eta + Duration::days(11);

        let error = helper
            .app
            .requests
            .submit(owner(ship.owner_id), submission)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ValidationError::Duration {
                days: 11,
                max: 10,
                ..
            }
        ));
    })
    .await;
}

#[tokio::test]
async fn test_submit_rejects_negative_cargo_weight() {
    test(|helper, builder| async move {
        let state = builder.ships(1).build().await;
        let ship = &state.ships[0];

        let mut submission =
            DockingRequestSubmission::test_default(ship.id, Utc::now() + Duration::days(7));
        if let Some(cargo) = submission.cargo.as_mut() {
            cargo.weight_tonnes = Some(-1.0);
        }

        let error = helper
            .app
            .requests
            .submit(owner(ship.owner_id), submission)
            .await
            .unwrap_err();

        assert!(matches!(error, ValidationError::CargoWeight { .. }));
    })
    .await;
}

#[tokio::test]
async fn test_submit_fails_for_unknown_ship() {
    test(|helper, _builder| async move {
        let error = helper
            .app
            .requests
            .submit(
                owner(UserId::new(1)),
                DockingRequestSubmission::test_default(
                    ShipId::new(999),
                    Utc::now() + Duration::days(7),
                ),
            )
            .await
            .unwrap_err();

        assert!(matches!(error, ValidationError::ShipNotFound { .. }));
    })
    .await;
}

#[tokio::test]
async fn test_approve_links_request_to_its_reservation() {
    test(|helper, builder| async move {
        let state = builder.berths(1).ships(1).docking_requests(1).build().await;
        let request = &state.docking_requests[0];

        let assignment = helper
            .app
            .requests
            .approve(request.id, operator())
            .await
            .unwrap();

        assert_eq!(assignment.berth_id, state.berths[0].id);
        assert_eq!(assignment.eta, request.eta);
        assert_eq!(assignment.etd, request.etd);

        let stored = stored_request(&helper, request.id).await;
        assert_eq!(stored.status, DockingRequestStatus::Approved);
        assert_eq!(stored.assignment_id, Some(assignment.id));
        assert_eq!(stored.processed_by, Some(operator().id));
        assert!(stored.processed_at.is_some());
    })
    .await;
}

#[tokio::test]
async fn test_owner_cannot_cancel_an_approved_request() {
    test(|helper, builder| async move {
        let state = builder.berths(1).ships(1).docking_requests(1).build().await;
        let request = &state.docking_requests[0];

        let assignment = helper
            .app
            .requests
            .approve(request.id, operator())
            .await
            .unwrap();

        let error = helper
            .app
            .requests
            .cancel(request.id, owner(request.owner_id))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            LifecycleError::AlreadyProcessed {
                current: DockingRequestStatus::Approved,
                ..
            }
        ));
        assert_eq!(
            stored_request(&helper, request.id).await.assignment_id,
            Some(assignment.id)
        );
        assert_eq!(helper.storage.all_assignments().await, vec![assignment]);
    })
    .await;
}

#[tokio::test]
async fn test_approving_twice_reports_already_processed() {
    test(|helper, builder| async move {
        let state = builder.berths(2).ships(1).docking_requests(1).build().await;
        let request_id = state.docking_requests[0].id;

        helper
            .app
            .requests
            .approve(request_id, operator())
            .await
            .unwrap();
        let error = helper
            .app
            .requests
            .approve(request_id, operator())
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ApproveError::Lifecycle {
                source: LifecycleError::AlreadyProcessed { .. },
                ..
            }
        ));
        assert_eq!(helper.storage.all_assignments().await.len(), 1);
    })
    .await;
}

#[tokio::test]
async fn test_failed_allocation_leaves_request_pending() {
    test(|helper, builder| async move {
        let state = builder
            .berths(1)
            .ships(1)
            .assignments(1)
            .modify(|a| {
                a.eta = ts(1, 8);
                a.etd = ts(3, 8);
            })
            .base()
            .ships(1)
            .docking_requests(1)
            .modify(|r| {
                r.eta = ts(2, 8);
                r.etd = ts(4, 8);
            })
            .build()
            .await;
        let request_id = state.docking_requests[0].id;

        let error = helper
            .app
            .requests
            .approve(request_id, operator())
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ApproveError::Allocation {
                source: AllocationError::AllFull {
                    overridable: false,
                    ..
                },
                ..
            }
        ));
        let stored = stored_request(&helper, request_id).await;
        assert_eq!(stored.status, DockingRequestStatus::Pending);
        assert!(stored.assignment_id.is_none());
    })
    .await;
}

#[tokio::test]
async fn test_reservation_is_released_when_request_cannot_be_stored() {
    test(|helper, builder| async move {
        let state = builder.berths(1).ships(1).docking_requests(1).build().await;
        let request_id = state.docking_requests[0].id;
        helper.storage.set_fail_request_updates(true);

        let error = helper
            .app
            .requests
            .approve(request_id, operator())
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ApproveError::Lifecycle {
                source: LifecycleError::LifecycleStorage { .. },
                ..
            }
        ));

        let assignments = helper.storage.all_assignments().await;
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].status, AssignmentStatus::Cancelled);
        assert_eq!(
            stored_request(&helper, request_id).await.status,
            DockingRequestStatus::Pending
        );

        helper.storage.set_fail_request_updates(false);
        let assignment = helper
            .app
            .requests
            .approve(request_id, operator())
            .await
            .unwrap();
        assert_eq!(assignment.berth_id, state.berths[0].id);
    })
    .await;
}

#[tokio::test]
async fn test_reservation_that_cannot_be_released_is_reported() {
    test(|helper, builder| async move {
        let state = builder.berths(1).ships(1).docking_requests(1).build().await;
        let request_id = state.docking_requests[0].id;
        helper.storage.set_fail_request_updates(true);
        helper.storage.set_fail_assignment_updates(true);

        let error = helper
            .app
            .requests
            .approve(request_id, operator())
            .await
            .unwrap_err();

        let assignments = helper.storage.all_assignments().await;
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].status, AssignmentStatus::Scheduled);

        match error {
            ApproveError::OrphanedReservation {
                assignment_id,
                link_error,
                ..
            } => {
                assert_eq!(assignment_id, assignments[0].id);
                assert!(matches!(link_error, LifecycleError::LifecycleStorage { .. }));
            }
            e => panic!("unexpected error: {e:?}"),
        }
        assert_eq!(
            stored_request(&helper, request_id).await.status,
            DockingRequestStatus::Pending
        );
    })
    .await;
}

#[tokio::test]
async fn test_approve_with_override_places_an_overridden_reservation() {
    test(|helper, builder| async move {
        let state = builder
            .berths(1)
            .ships(1)
            .assignments(1)
            .modify(|a| {
                a.eta = ts(1, 8);
                a.etd = ts(3, 8);
            })
            .base()
            .ships(1)
            .docking_requests(1)
            .modify(|r| {
                r.eta = ts(2, 8);
                r.etd = ts(4, 8);
            })
            .build()
            .await;
        let request_id = state.docking_requests[0].id;

        let assignment = helper
            .app
            .requests
            .approve_with_override(request_id, harbor_master(), state.berths[0].id)
            .await
            .unwrap();

        assert!(assignment.overridden);
        assert_eq!(
            stored_request(&helper, request_id).await.assignment_id,
            Some(assignment.id)
        );
    })
    .await;
}

#[tokio::test]
async fn test_approve_with_override_requires_override_capability() {
    test(|helper, builder| async move {
        let state = builder.berths(1).ships(1).docking_requests(1).build().await;
        let request_id = state.docking_requests[0].id;

        let error = helper
            .app
            .requests
            .approve_with_override(request_id, operator(), state.berths[0].id)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ApproveError::Allocation {
                source: AllocationError::OverrideNotPermitted { .. },
                ..
            }
        ));
        assert!(
            stored_request(&helper, request_id)
                .await
                .is_pending()
        );
    })
    .await;
}

#[tokio::test]
async fn test_ship_owners_cannot_process_requests() {
    test(|helper, builder| async move {
        let state = builder.berths(1).ships(1).docking_requests(1).build().await;
        let request = &state.docking_requests[0];
        let owner = owner(request.owner_id);

        let approve = helper.app.requests.approve(request.id, owner).await;
        let reject = helper.app.requests.reject(request.id, owner, "no").await;
        let queue = helper.app.requests.pending_queue(owner).await;

        assert!(matches!(
            approve,
            Err(ApproveError::Lifecycle {
                source: LifecycleError::NotPermitted { .. },
                ..
            })
        ));
        assert!(matches!(reject, Err(LifecycleError::NotPermitted { .. })));
        assert!(matches!(queue, Err(LifecycleError::NotPermitted { .. })));
        assert!(helper.storage.all_assignments().await.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_reject_stores_trimmed_reason() {
    test(|helper, builder| async move {
        let state = builder.ships(1).docking_requests(1).build().await;
        let request_id = state.docking_requests[0].id;

        helper
            .app
            .requests
            .reject(request_id, operator(), "  Berth under maintenance ")
            .await
            .unwrap();

        let stored = stored_request(&helper, request_id).await;
        assert_eq!(stored.status, DockingRequestStatus::Rejected);
        assert_eq!(
            stored.rejection_reason.as_deref(),
            Some("Berth under maintenance")
        );
        assert_eq!(stored.processed_by, Some(operator().id));
    })
    .await;
}

#[tokio::test]
async fn test_reject_requires_a_reason() {
    test(|helper, builder| async move {
        let state = builder.ships(1).docking_requests(1).build().await;
        let request_id = state.docking_requests[0].id;

        let error = helper
            .app
            .requests
            .reject(request_id, operator(), "   ")
            .await
            .unwrap_err();

        assert!(matches!(error, LifecycleError::EmptyRejectionReason { .. }));
        assert!(stored_request(&helper, request_id).await.is_pending());
    })
    .await;
}

#[tokio::test]
async fn test_owner_cancels_pending_request() {
    test(|helper, builder| async move {
        let state = builder.ships(1).docking_requests(1).build().await;
        let request = &state.docking_requests[0];

        helper
            .app
            .requests
            .cancel(request.id, owner(request.owner_id))
            .await
            .unwrap();

        assert_eq!(
            stored_request(&helper, request.id).await.status,
            DockingRequestStatus::Cancelled
        );
    })
    .await;
}

#[tokio::test]
async fn test_only_the_owner_may_cancel() {
    test(|helper, builder| async move {
        let state = builder.ships(1).docking_requests(1).build().await;
        let request_id = state.docking_requests[0].id;

        let error = helper
            .app
            .requests
            .cancel(request_id, admin())
            .await
            .unwrap_err();

        assert!(matches!(error, LifecycleError::NotOwner { .. }));
        assert!(stored_request(&helper, request_id).await.is_pending());
    })
    .await;
}

#[tokio::test]
async fn test_transitions_on_unknown_request_fail() {
    test(|helper, _builder| async move {
        let error = helper
            .app
            .requests
            .reject(DockingRequestId::new(999), operator(), "full")
            .await
            .unwrap_err();

        assert!(matches!(error, LifecycleError::RequestNotFound { .. }));
    })
    .await;
}

#[tokio::test]
async fn test_pending_queue_orders_by_priority_then_submission() {
    test(|helper, builder| async move {
        let state = builder
            .ships(3)
            .modify_idx(|i, s| {
                s.ship.ship_type = match i {
                    0 => ShipType::Container,
                    1 => ShipType::Passenger,
                    _ => ShipType::Tanker,
                }
            })
            .docking_requests(2)
            .build()
            .await;

        helper
            .app
            .requests
            .reject(state.docking_requests[5].id, operator(), "duplicate")
            .await
            .unwrap();

        let queue: Vec<_> = helper
            .app
            .requests
            .pending_queue(operator())
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();

        let requests = &state.docking_requests;
        assert_eq!(
            queue,
            vec![
                requests[2].id,
                requests[3].id,
                requests[4].id,
                requests[0].id,
                requests[1].id,
            ]
        );
    })
    .await;
}
