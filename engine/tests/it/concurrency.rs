use crate::helper::*;
use engine::*;
use futures::future::join_all;
use harbor_core::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_approvals_for_one_berth_book_it_once() {
    test(|helper, builder| async move {
        let state = builder
            .berths(1)
            .ships(8)
            .docking_requests(1)
            .modify(|r| {
                r.eta = ts(10, 8);
                r.etd = ts(12, 8);
            })
            .build()
            .await;
        // Leaves the berth lock as the only guard against double booking.
        helper.storage.set_enforce_exclusion(false);

        let handles = state.docking_requests.iter().map(|r| {
            let app = helper.app.clone();
            let request_id = r.id;
            tokio::spawn(async move { app.requests.approve(request_id, operator()).await })
        });
        let results: Vec<_> = join_all(handles)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().filter_map(|r| r.as_ref().err()).all(|e| matches!(
            e,
            ApproveError::Allocation {
                source: AllocationError::AllFull { .. },
                ..
            }
        )));

        let live: Vec<_> = helper
            .storage
            .all_assignments()
            .await
            .into_iter()
            .filter(|a| a.status != AssignmentStatus::Cancelled)
            .collect();
        assert_eq!(live.len(), 1);

        let requests = helper.storage.all_docking_requests().await;
        assert_eq!(
            requests
                .iter()
                .filter(|r| r.status == DockingRequestStatus::Approved)
                .count(),
            1
        );
        assert_eq!(requests.iter().filter(|r| r.is_pending()).count(), 7);
    })
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_approvals_of_one_request_allocate_once() {
    test(|helper, builder| async move {
        let state = builder.berths(3).ships(1).docking_requests(1).build().await;
        let request_id = state.docking_requests[0].id;

        let handles = (0..6).map(|_| {
            let app = helper.app.clone();
            tokio::spawn(async move { app.requests.approve(request_id, operator()).await })
        });
        let results: Vec<_> = join_all(handles)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().filter_map(|r| r.as_ref().err()).all(|e| matches!(
            e,
            ApproveError::Lifecycle {
                source: LifecycleError::AlreadyProcessed {
                    current: DockingRequestStatus::Approved,
                    ..
                },
                ..
            }
        )));
        assert_eq!(helper.storage.all_assignments().await.len(), 1);
    })
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reject_and_cancel_settle_on_one_outcome() {
    test(|helper, builder| async move {
        let state = builder.ships(1).docking_requests(1).build().await;
        let request_id = state.docking_requests[0].id;
        let owner_id = state.docking_requests[0].owner_id;

        let app = helper.app.clone();
        let reject = tokio::spawn(async move {
            app.requests
                .reject(request_id, operator(), "berth closed")
                .await
        });
        let app = helper.app.clone();
        let cancel = tokio::spawn(async move {
            app.requests
                .cancel(request_id, owner(owner_id))
                .await
        });

        let reject = reject.await.unwrap();
        let cancel = cancel.await.unwrap();
        assert!(reject.is_ok() != cancel.is_ok());

        let stored = helper
            .storage
            .docking_request(request_id)
            .await
            .unwrap()
            .unwrap();
        if reject.is_ok() {
            assert_eq!(stored.status, DockingRequestStatus::Rejected);
        } else {
            assert_eq!(stored.status, DockingRequestStatus::Cancelled);
        }
    })
    .await;
}
