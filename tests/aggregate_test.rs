//! Integration tests for blood inventory aggregate maintenance

use nexus::adapters::gateway::{GatewayOp, InMemoryGateway};
use nexus::core::facade::Synchronizer;
use nexus::core::mutator::FailurePolicy;
use nexus::domain::records::{BagStatus, BloodBag, BloodGroup, BloodUnit, StockTier};
use nexus::domain::{EntityId, EntityKind, Patch, RemoteError};
use serde_json::json;
use std::sync::Arc;

fn id(raw: &str) -> EntityId {
    EntityId::new(raw).unwrap()
}

fn bag(raw_id: &str, group: BloodGroup, status: BagStatus) -> BloodBag {
    BloodBag {
        id: id(raw_id),
        blood_group: group,
        donor_id: Some("D-001".to_string()),
        donor_name: Some("John Smith".to_string()),
        collection_date: "2024-01-20".to_string(),
        expiry_date: "2024-02-20".to_string(),
        volume: 450.0,
        status,
        location: Some("Freezer C-2".to_string()),
    }
}

fn unit(sync: &Synchronizer, group: BloodGroup) -> BloodUnit {
    sync.inventory()
        .into_iter()
        .find(|unit| unit.group == group)
        .unwrap()
}

async fn loaded(gateway: InMemoryGateway) -> (Arc<InMemoryGateway>, Synchronizer) {
    let gateway = Arc::new(gateway);
    let sync = Synchronizer::new(gateway.clone());
    assert!(sync.refresh_all().await.is_complete());
    (gateway, sync)
}

#[tokio::test]
async fn test_new_bags_raise_count_and_tier() {
    let (_gateway, sync) = loaded(InMemoryGateway::seeded()).await;
    assert_eq!(unit(&sync, BloodGroup::ONeg).bags, 4);

    sync.add(bag("BB-101", BloodGroup::ONeg, BagStatus::Available))
        .await
        .unwrap();
    let o_neg = unit(&sync, BloodGroup::ONeg);
    assert_eq!(o_neg.bags, 5);
    assert_eq!(o_neg.status, StockTier::Low);

    sync.add(bag("BB-102", BloodGroup::ONeg, BagStatus::Reserved))
        .await
        .unwrap();
    let o_neg = unit(&sync, BloodGroup::ONeg);
    assert_eq!(o_neg.bags, 6);
    assert_eq!(o_neg.status, StockTier::Adequate);
}

#[tokio::test]
async fn test_bag_created_in_terminal_state_does_not_count() {
    let (_gateway, sync) = loaded(InMemoryGateway::seeded()).await;

    sync.add(bag("BB-101", BloodGroup::ONeg, BagStatus::Expired))
        .await
        .unwrap();

    assert_eq!(unit(&sync, BloodGroup::ONeg).bags, 4);
}

#[tokio::test]
async fn test_bag_used_lowers_count() {
    let (_gateway, sync) = loaded(InMemoryGateway::seeded()).await;

    let updated = sync
        .update::<BloodBag>(&id("BB-001"), Patch::new().set("status", "Used"))
        .await
        .unwrap();

    assert_eq!(updated.status, BagStatus::Used);
    assert_eq!(unit(&sync, BloodGroup::APos).bags, 11);
}

#[tokio::test]
async fn test_reserving_a_bag_leaves_count_unchanged() {
    let (_gateway, sync) = loaded(InMemoryGateway::seeded()).await;

    sync.update::<BloodBag>(&id("BB-002"), Patch::new().set("status", "Reserved"))
        .await
        .unwrap();

    assert_eq!(unit(&sync, BloodGroup::APos).bags, 12);
}

#[tokio::test]
async fn test_deleting_active_bag_lowers_count() {
    let (_gateway, sync) = loaded(InMemoryGateway::seeded()).await;

    sync.delete::<BloodBag>(&id("BB-003")).await.unwrap();

    assert_eq!(unit(&sync, BloodGroup::BPos).bags, 14);
}

#[tokio::test]
async fn test_regrouping_a_bag_moves_count() {
    let (_gateway, sync) = loaded(InMemoryGateway::seeded()).await;

    sync.update::<BloodBag>(&id("BB-002"), Patch::new().set("blood_group", "B-"))
        .await
        .unwrap();

    assert_eq!(unit(&sync, BloodGroup::APos).bags, 11);
    let b_neg = unit(&sync, BloodGroup::BNeg);
    assert_eq!(b_neg.bags, 3);
    assert_eq!(b_neg.status, StockTier::Low);
}

#[tokio::test]
async fn test_rejected_bag_mutation_leaves_aggregates_alone() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded()).await;
    gateway.fail(
        EntityKind::BloodBags,
        GatewayOp::Create,
        RemoteError::ServerError {
            status: 500,
            detail: "Internal Server Error".to_string(),
        },
    );

    assert!(sync
        .add(bag("BB-101", BloodGroup::ONeg, BagStatus::Available))
        .await
        .is_err());

    assert_eq!(unit(&sync, BloodGroup::ONeg).bags, 4);
}

#[tokio::test]
async fn test_count_never_drops_below_zero() {
    let gateway = InMemoryGateway::seeded()
        .with_collection(
            EntityKind::BloodUnits,
            vec![json!({"id": "BU-008", "group": "AB-", "bags": 1, "status": "Critical"})],
        )
        .with_collection(
            EntityKind::BloodBags,
            vec![
                json!({"id": "BB-1", "blood_group": "AB-", "collection_date": "2024-01-15", "expiry_date": "2024-02-15", "status": "Available"}),
                json!({"id": "BB-2", "blood_group": "AB-", "collection_date": "2024-01-15", "expiry_date": "2024-02-15", "status": "Available"}),
            ],
        );
    let (_gateway, sync) = loaded(gateway).await;

    sync.delete::<BloodBag>(&id("BB-1")).await.unwrap();
    sync.delete::<BloodBag>(&id("BB-2")).await.unwrap();

    let ab_neg = unit(&sync, BloodGroup::AbNeg);
    assert_eq!(ab_neg.bags, 0);
    assert_eq!(ab_neg.status, StockTier::Critical);
}

#[tokio::test]
async fn test_missing_aggregate_row_is_counted_and_bag_kept() {
    let gateway = InMemoryGateway::seeded().with_collection(EntityKind::BloodUnits, Vec::new());
    let (_gateway, sync) = loaded(gateway).await;

    let created = sync
        .add(bag("BB-101", BloodGroup::ONeg, BagStatus::Available))
        .await
        .unwrap();

    assert_eq!(sync.aggregate_lookup_misses(), 1);
    assert!(sync.get::<BloodBag>(&created.id).is_some());
    assert!(sync.inventory().is_empty());
}

#[tokio::test]
async fn test_adjustments_are_pushed_when_enabled() {
    let gateway = Arc::new(InMemoryGateway::seeded());
    let sync = Synchronizer::new(gateway.clone()).with_aggregate_push(true);
    sync.refresh_all().await;

    sync.add(bag("BB-101", BloodGroup::ONeg, BagStatus::Available))
        .await
        .unwrap();

    assert_eq!(gateway.calls_to(EntityKind::BloodUnits, GatewayOp::Update), 1);
    let remote = gateway.record(EntityKind::BloodUnits, &id("BU-006")).unwrap();
    assert_eq!(remote["bags"], 5);
    assert_eq!(remote["status"], "Low");
}

#[tokio::test]
async fn test_adjustments_stay_local_by_default() {
    let (gateway, sync) = loaded(InMemoryGateway::seeded()).await;

    sync.add(bag("BB-101", BloodGroup::ONeg, BagStatus::Available))
        .await
        .unwrap();

    assert_eq!(gateway.calls_to(EntityKind::BloodUnits, GatewayOp::Update), 0);
    assert_eq!(
        gateway.record(EntityKind::BloodUnits, &id("BU-006")).unwrap()["bags"],
        4
    );
}

#[tokio::test]
async fn test_failed_push_keeps_local_adjustment() {
    let gateway = Arc::new(InMemoryGateway::seeded());
    let sync = Synchronizer::new(gateway.clone()).with_aggregate_push(true);
    sync.refresh_all().await;
    gateway.fail(
        EntityKind::BloodUnits,
        GatewayOp::Update,
        RemoteError::Unavailable("maintenance".to_string()),
    );

    sync.add(bag("BB-101", BloodGroup::ONeg, BagStatus::Available))
        .await
        .unwrap();

    assert_eq!(unit(&sync, BloodGroup::ONeg).bags, 5);
}

#[tokio::test]
async fn test_audit_reports_drift_against_bag_records() {
    let (_gateway, sync) = loaded(InMemoryGateway::seeded()).await;

    let audit = sync.audit_inventory();

    assert!(!audit.is_consistent());
    let a_pos = audit
        .entries
        .iter()
        .find(|entry| entry.group == BloodGroup::APos)
        .unwrap();
    assert_eq!(a_pos.recorded, Some(12));
    assert_eq!(a_pos.active_bags, 2);
    assert_eq!(a_pos.drift(), Some(10));
}

#[tokio::test]
async fn test_audit_is_consistent_when_counts_match_bags() {
    let gateway = InMemoryGateway::seeded()
        .with_collection(
            EntityKind::BloodUnits,
            vec![json!({"id": "BU-001", "group": "A+", "bags": 1, "status": "Critical"})],
        )
        .with_collection(
            EntityKind::BloodBags,
            vec![json!({"id": "BB-1", "blood_group": "A+", "collection_date": "2024-01-15", "expiry_date": "2024-02-15", "status": "Available"})],
        );
    let (_gateway, sync) = loaded(gateway).await;

    assert!(sync.audit_inventory().is_consistent());

    sync.add(bag("BB-2", BloodGroup::APos, BagStatus::Available))
        .await
        .unwrap();
    assert!(sync.audit_inventory().is_consistent());
}

fn single_a_pos_bag() -> InMemoryGateway {
    InMemoryGateway::seeded()
        .with_collection(
            EntityKind::BloodUnits,
            vec![json!({"id": "BU-001", "group": "A+", "bags": 1, "status": "Critical"})],
        )
        .with_collection(
            EntityKind::BloodBags,
            vec![json!({"id": "BB-1", "blood_group": "A+", "collection_date": "2024-01-15", "expiry_date": "2024-02-15", "status": "Available"})],
        )
}

fn refused() -> RemoteError {
    RemoteError::Rejected {
        status: 422,
        detail: "Invalid status transition".to_string(),
    }
}

async fn kept_and_marked(gateway: InMemoryGateway) -> (Arc<InMemoryGateway>, Synchronizer) {
    let gateway = Arc::new(gateway);
    let sync = Synchronizer::new(gateway.clone()).with_failure_policy(FailurePolicy::KeepAndMark);
    assert!(sync.refresh_all().await.is_complete());
    (gateway, sync)
}

#[tokio::test]
async fn test_update_after_kept_refusal_counts_from_confirmed_bag() {
    let (gateway, sync) = kept_and_marked(single_a_pos_bag()).await;
    gateway.fail_once(EntityKind::BloodBags, GatewayOp::Update, refused());

    assert!(sync
        .update::<BloodBag>(&id("BB-1"), Patch::new().set("status", "Used"))
        .await
        .is_err());
    assert_eq!(sync.get::<BloodBag>(&id("BB-1")).unwrap().status, BagStatus::Used);
    assert_eq!(unit(&sync, BloodGroup::APos).bags, 1);

    sync.update::<BloodBag>(&id("BB-1"), Patch::new().set("status", "Expired"))
        .await
        .unwrap();

    let remote = gateway.record(EntityKind::BloodBags, &id("BB-1")).unwrap();
    assert_eq!(remote["status"], "Expired");
    assert_eq!(unit(&sync, BloodGroup::APos).bags, 0);
    assert!(sync.audit_inventory().is_consistent());
}

#[tokio::test]
async fn test_delete_after_kept_refusal_counts_from_confirmed_bag() {
    let (gateway, sync) = kept_and_marked(single_a_pos_bag()).await;
    gateway.fail_once(EntityKind::BloodBags, GatewayOp::Update, refused());

    assert!(sync
        .update::<BloodBag>(&id("BB-1"), Patch::new().set("status", "Discarded"))
        .await
        .is_err());

    sync.delete::<BloodBag>(&id("BB-1")).await.unwrap();

    assert_eq!(unit(&sync, BloodGroup::APos).bags, 0);
    assert!(sync.audit_inventory().is_consistent());
}

#[tokio::test]
async fn test_overlapping_updates_with_refused_first_keep_count() {
    let (gateway, sync) = loaded(single_a_pos_bag()).await;
    gateway.hold();
    gateway.fail_once(EntityKind::BloodBags, GatewayOp::Update, refused());

    let target_id = id("BB-1");
    let first = sync.update::<BloodBag>(&target_id, Patch::new().set("status", "Used"));
    let second = async {
        while gateway.in_flight() < 1 {
            tokio::task::yield_now().await;
        }
        let update = sync.update::<BloodBag>(&target_id, Patch::new().set("status", "Available"));
        let release = async {
            while gateway.in_flight() < 2 {
                tokio::task::yield_now().await;
            }
            gateway.release();
        };
        let (result, ()) = tokio::join!(update, release);
        result
    };
    let (first, second) = tokio::join!(first, second);

    assert!(first.is_err());
    assert_eq!(second.unwrap().status, BagStatus::Available);
    let remote = gateway.record(EntityKind::BloodBags, &id("BB-1")).unwrap();
    assert_eq!(remote["status"], "Available");
    assert_eq!(unit(&sync, BloodGroup::APos).bags, 1);
    assert!(sync.audit_inventory().is_consistent());
}
