//! Integration tests for optimistic create/update and confirmed delete
//!
//! Every test drives a `Synchronizer` over the in-memory gateway. The hold
//! gate parks remote calls so the optimistic state can be inspected while a
//! mutation is still in flight.

use nexus::adapters::gateway::{GatewayOp, InMemoryGateway};
use nexus::core::facade::Synchronizer;
use nexus::core::mutator::FailurePolicy;
use nexus::core::store::{Operation, SyncState};
use nexus::domain::records::{Patient, Task, TaskPriority, TaskStatus, UrgencyLevel};
use nexus::domain::{EntityId, EntityKind, NexusError, Patch, RemoteError};
use std::sync::Arc;
use std::time::Duration;

fn id(raw: &str) -> EntityId {
    EntityId::new(raw).unwrap()
}

fn task(raw_id: &str, title: &str) -> Task {
    Task {
        id: id(raw_id),
        title: title.to_string(),
        assignee: "Nurse Joy".to_string(),
        priority: TaskPriority::High,
        status: TaskStatus::Todo,
    }
}

fn patient(raw_id: &str) -> Patient {
    Patient {
        id: id(raw_id),
        name: "Grace Hopper".to_string(),
        age: 71,
        gender: "Female".to_string(),
        admission_date: "2023-10-27".to_string(),
        condition: "Observation".to_string(),
        room_number: None,
        urgency: UrgencyLevel::Low,
        history: None,
        status: None,
        ward: None,
        phone: None,
        email: None,
    }
}

fn rejected(status: u16, detail: &str) -> RemoteError {
    RemoteError::Rejected {
        status,
        detail: detail.to_string(),
    }
}

async fn loaded(gateway: InMemoryGateway, policy: FailurePolicy) -> (Arc<InMemoryGateway>, Synchronizer) {
    let gateway = Arc::new(gateway);
    let sync = Synchronizer::new(gateway.clone()).with_failure_policy(policy);
    let report = sync.refresh_all().await;
    assert!(report.is_complete());
    (gateway, sync)
}

/// Waits until a call is parked inside the gateway
async fn wait_for_call(gateway: &InMemoryGateway) {
    for _ in 0..500 {
        if gateway.in_flight() > 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("no call reached the gateway");
}

#[tokio::test]
async fn test_create_is_visible_before_confirmation() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;
    gateway.hold();

    let (result, ()) = tokio::join!(sync.add(task("T-9", "Check oxygen supply")), async {
        wait_for_call(&gateway).await;
        let rows = sync.rows::<Task>();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].record().id, id("T-9"));
        assert_eq!(rows[0].state(), &SyncState::PendingCreate);
        gateway.release();
    });

    let created = result.unwrap();
    assert_eq!(created.title, "Check oxygen supply");
    let row = sync.store().row::<Task>(&id("T-9")).unwrap();
    assert!(row.state().is_confirmed());
    assert!(gateway.record(EntityKind::Tasks, &id("T-9")).is_some());
}

#[tokio::test]
async fn test_create_rejected_is_rolled_back() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;
    gateway.fail(EntityKind::Tasks, GatewayOp::Create, rejected(422, "title required"));

    let result = sync.add(task("T-9", "")).await;

    match result {
        Err(NexusError::Remote(error)) => assert_eq!(error.detail(), "title required"),
        other => panic!("expected remote error, got {other:?}"),
    }
    assert!(sync.get::<Task>(&id("T-9")).is_none());
    assert_eq!(sync.list::<Task>().len(), 4);
}

#[tokio::test]
async fn test_create_rejected_is_kept_and_marked() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::KeepAndMark).await;
    gateway.fail(
        EntityKind::Tasks,
        GatewayOp::Create,
        RemoteError::ServerError {
            status: 500,
            detail: "Internal Server Error".to_string(),
        },
    );

    assert!(sync.add(task("T-9", "Check oxygen supply")).await.is_err());

    let row = sync.store().row::<Task>(&id("T-9")).unwrap();
    assert_eq!(
        row.state(),
        &SyncState::Failed {
            operation: Operation::Create,
            detail: "Internal Server Error".to_string(),
        }
    );
}

#[tokio::test]
async fn test_create_adopts_server_assigned_id() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded().with_server_ids(), FailurePolicy::Rollback).await;

    let created = sync.add(patient("local-1")).await.unwrap();

    assert_ne!(created.id, id("local-1"));
    assert!(created.id.as_str().starts_with("P-"));
    assert!(sync.get::<Patient>(&id("local-1")).is_none());
    assert_eq!(sync.get::<Patient>(&created.id).unwrap().name, "Grace Hopper");
    assert_eq!(sync.list::<Patient>().len(), 6);
    assert!(gateway.record(EntityKind::Patients, &created.id).is_some());
}

#[tokio::test]
async fn test_create_with_duplicate_id_never_reaches_gateway() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;

    let result = sync.add(task("1", "Duplicate")).await;

    assert!(matches!(result, Err(NexusError::DuplicateId { .. })));
    assert_eq!(gateway.calls_to(EntityKind::Tasks, GatewayOp::Create), 0);
    assert_eq!(sync.get::<Task>(&id("1")).unwrap().title, "Review MRI Results for Bed 3");
}

#[tokio::test]
async fn test_update_is_visible_before_confirmation() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;
    gateway.hold();

    let target_id = id("2");
    let (result, ()) = tokio::join!(sync.update_task_status(&target_id, TaskStatus::InProgress), async {
        wait_for_call(&gateway).await;
        let row = sync.store().row::<Task>(&id("2")).unwrap();
        assert_eq!(row.record().status, TaskStatus::InProgress);
        match row.state() {
            SyncState::PendingUpdate { previous } => assert_eq!(previous.status, TaskStatus::Todo),
            other => panic!("expected pending update, got {other:?}"),
        }
        gateway.release();
    });

    assert_eq!(result.unwrap().status, TaskStatus::InProgress);
    assert!(sync.store().row::<Task>(&id("2")).unwrap().state().is_confirmed());
    assert_eq!(
        gateway.record(EntityKind::Tasks, &id("2")).unwrap()["status"],
        "In Progress"
    );
}

#[tokio::test]
async fn test_update_rejected_is_rolled_back() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;
    gateway.fail(EntityKind::Tasks, GatewayOp::Update, rejected(400, "Invalid status"));

    let result = sync.update_task_status(&id("1"), TaskStatus::Done).await;

    assert!(matches!(result, Err(NexusError::Remote(_))));
    let row = sync.store().row::<Task>(&id("1")).unwrap();
    assert_eq!(row.record().status, TaskStatus::Todo);
    assert!(row.state().is_confirmed());
}

#[tokio::test]
async fn test_update_rejected_is_kept_and_marked() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::KeepAndMark).await;
    gateway.fail(
        EntityKind::Tasks,
        GatewayOp::Update,
        RemoteError::Timeout("operation timed out".to_string()),
    );

    assert!(sync.update_task_status(&id("1"), TaskStatus::Done).await.is_err());

    let row = sync.store().row::<Task>(&id("1")).unwrap();
    assert_eq!(row.record().status, TaskStatus::Done);
    assert!(matches!(
        row.state(),
        SyncState::Failed {
            operation: Operation::Update,
            ..
        }
    ));
}

#[tokio::test]
async fn test_update_of_unknown_id_never_reaches_gateway() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;

    let result = sync
        .update::<Task>(&id("missing"), Patch::new().set("title", "Ghost"))
        .await;

    assert!(matches!(result, Err(NexusError::NotFound { .. })));
    assert_eq!(gateway.calls_to(EntityKind::Tasks, GatewayOp::Update), 0);
}

#[tokio::test]
async fn test_update_with_invalid_patch_is_refused_locally() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;

    let result = sync
        .update::<Task>(&id("1"), Patch::new().set("priority", "Whenever"))
        .await;

    assert!(result.is_err());
    assert_eq!(gateway.calls_to(EntityKind::Tasks, GatewayOp::Update), 0);
    assert_eq!(sync.get::<Task>(&id("1")).unwrap().priority, TaskPriority::High);
}

#[tokio::test]
async fn test_stale_confirmation_does_not_overwrite_newer_write() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;
    gateway.hold();

    let target_id = id("3");
    let (result, ()) = tokio::join!(
        sync.update::<Task>(&target_id, Patch::new().set("title", "Discharge P-101 today")),
        async {
            wait_for_call(&gateway).await;
            sync.store()
                .patch::<Task>(&id("3"), &Patch::new().set("assignee", "Dr. Chen"))
                .unwrap();
            gateway.release();
        }
    );

    assert!(result.is_ok());
    let current = sync.get::<Task>(&id("3")).unwrap();
    assert_eq!(current.assignee, "Dr. Chen");
    assert_eq!(current.title, "Discharge P-101 today");
}

#[tokio::test]
async fn test_stale_failure_does_not_roll_back_newer_write() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;
    gateway.fail(EntityKind::Tasks, GatewayOp::Update, rejected(409, "Conflict"));
    gateway.hold();

    let target_id = id("3");
    let (result, ()) = tokio::join!(
        sync.update::<Task>(&target_id, Patch::new().set("title", "Rejected title")),
        async {
            wait_for_call(&gateway).await;
            sync.store()
                .patch::<Task>(&id("3"), &Patch::new().set("assignee", "Dr. Chen"))
                .unwrap();
            gateway.release();
        }
    );

    assert!(result.is_err());
    let current = sync.get::<Task>(&id("3")).unwrap();
    assert_eq!(current.assignee, "Dr. Chen");
    assert_eq!(current.title, "Rejected title");
}

#[tokio::test]
async fn test_delete_waits_for_confirmation() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;
    gateway.hold();

    let target_id = id("4");
    let (result, ()) = tokio::join!(sync.delete::<Task>(&target_id), async {
        wait_for_call(&gateway).await;
        let row = sync.store().row::<Task>(&id("4")).unwrap();
        assert_eq!(row.state(), &SyncState::PendingDelete);
        gateway.release();
    });

    result.unwrap();
    assert!(sync.get::<Task>(&id("4")).is_none());
    assert!(gateway.record(EntityKind::Tasks, &id("4")).is_none());
}

#[tokio::test]
async fn test_delete_rejected_keeps_row() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;
    gateway.fail(EntityKind::Tasks, GatewayOp::Delete, rejected(403, "Forbidden"));

    assert!(sync.delete::<Task>(&id("4")).await.is_err());

    let row = sync.store().row::<Task>(&id("4")).unwrap();
    assert!(row.state().is_confirmed());
    assert_eq!(sync.list::<Task>().len(), 4);
}

#[tokio::test]
async fn test_delete_rejected_is_marked_under_keep_and_mark() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::KeepAndMark).await;
    gateway.fail(EntityKind::Tasks, GatewayOp::Delete, rejected(403, "Forbidden"));

    assert!(sync.delete::<Task>(&id("4")).await.is_err());

    let row = sync.store().row::<Task>(&id("4")).unwrap();
    assert_eq!(
        row.state(),
        &SyncState::Failed {
            operation: Operation::Delete,
            detail: "Forbidden".to_string(),
        }
    );
}

#[tokio::test]
async fn test_delete_of_unknown_id_surfaces_remote_not_found() {
    let (_gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;

    let result = sync.delete::<Task>(&id("missing")).await;

    match result {
        Err(NexusError::Remote(error)) => {
            assert_eq!(error.status(), Some(404));
            assert_eq!(error.detail(), "Tasks not found");
        }
        other => panic!("expected 404, got {other:?}"),
    }
}

#[tokio::test]
async fn test_mutations_bump_revision() {
    let (_gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;
    let mut revisions = sync.subscribe();
    revisions.borrow_and_update();

    sync.add(task("T-9", "Check oxygen supply")).await.unwrap();

    assert!(revisions.has_changed().unwrap());
}

#[tokio::test]
async fn test_failures_are_never_retried() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded(), FailurePolicy::Rollback).await;
    gateway.fail(
        EntityKind::Tasks,
        GatewayOp::Create,
        RemoteError::ConnectionFailed("connection refused".to_string()),
    );

    assert!(sync.add(task("T-9", "Check oxygen supply")).await.is_err());

    assert_eq!(gateway.calls_to(EntityKind::Tasks, GatewayOp::Create), 1);
}
