//! Inventory drift audit
//!
//! Compares each group's recorded bag count with the number of active bag
//! records currently held. Aggregate rows are seeded by the remote side, so
//! the audit reports differences and never rewrites counts.

use crate::core::store::EntityStore;
use crate::domain::records::{BloodBag, BloodGroup, BloodUnit, StockTier};
use crate::domain::{Entity, EntityId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Audit line for one blood group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub group: BloodGroup,
    pub unit_id: Option<EntityId>,
    /// Count on the aggregate row, if one exists
    pub recorded: Option<u32>,
    pub status: Option<StockTier>,
    /// Active bag records held for the group
    pub active_bags: u32,
}

impl AuditEntry {
    /// Recorded count minus active bags; `None` without an aggregate row
    pub fn drift(&self) -> Option<i64> {
        self.recorded
            .map(|recorded| i64::from(recorded) - i64::from(self.active_bags))
    }

    pub fn is_consistent(&self) -> bool {
        self.drift() == Some(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryAudit {
    pub entries: Vec<AuditEntry>,
}

impl InventoryAudit {
    /// Builds the audit from a store snapshot
    pub fn from_store(store: &EntityStore) -> Self {
        let mut active: BTreeMap<BloodGroup, u32> = BTreeMap::new();
        for bag in store.list::<BloodBag>() {
            if let Some(group) = bag.inventory_key() {
                *active.entry(group).or_insert(0) += 1;
            }
        }

        let units = store.list::<BloodUnit>();
        let entries = BloodGroup::ALL
            .iter()
            .map(|group| {
                let unit = units.iter().find(|unit| unit.group == *group);
                AuditEntry {
                    group: *group,
                    unit_id: unit.map(|u| u.id.clone()),
                    recorded: unit.map(|u| u.bags),
                    status: unit.map(|u| u.status),
                    active_bags: active.get(group).copied().unwrap_or(0),
                }
            })
            .collect();

        Self { entries }
    }

    /// Entries whose recorded count differs from the active bags, or that
    /// have no aggregate row while bags exist
    pub fn drifted(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries
            .iter()
            .filter(|entry| !entry.is_consistent() && (entry.recorded.is_some() || entry.active_bags > 0))
    }

    pub fn is_consistent(&self) -> bool {
        self.drifted().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::BagStatus;

    fn bag(id: &str, group: BloodGroup, status: BagStatus) -> BloodBag {
        BloodBag {
            id: EntityId::new(id).unwrap(),
            blood_group: group,
            donor_id: None,
            donor_name: None,
            collection_date: "2024-01-15".to_string(),
            expiry_date: "2024-02-15".to_string(),
            volume: 450.0,
            status,
            location: None,
        }
    }

    #[test]
    fn test_audit_counts_only_active_bags() {
        let store = EntityStore::new();
        store
            .insert_front(BloodUnit::new(EntityId::new("BU-1").unwrap(), BloodGroup::APos, 2))
            .unwrap();
        store.insert_front(bag("BB-1", BloodGroup::APos, BagStatus::Available)).unwrap();
        store.insert_front(bag("BB-2", BloodGroup::APos, BagStatus::Reserved)).unwrap();
        store.insert_front(bag("BB-3", BloodGroup::APos, BagStatus::Expired)).unwrap();

        let audit = InventoryAudit::from_store(&store);
        let a_pos = audit
            .entries
            .iter()
            .find(|e| e.group == BloodGroup::APos)
            .unwrap();

        assert_eq!(a_pos.active_bags, 2);
        assert!(a_pos.is_consistent());
        assert!(audit.is_consistent());
    }

    #[test]
    fn test_audit_reports_drift_and_orphan_bags() {
        let store = EntityStore::new();
        store
            .insert_front(BloodUnit::new(EntityId::new("BU-1").unwrap(), BloodGroup::OPos, 20))
            .unwrap();
        store.insert_front(bag("BB-1", BloodGroup::BNeg, BagStatus::Available)).unwrap();

        let audit = InventoryAudit::from_store(&store);
        let drifted: Vec<_> = audit.drifted().map(|e| e.group).collect();

        assert_eq!(drifted, vec![BloodGroup::BNeg, BloodGroup::OPos]);
        let o_pos = audit.entries.iter().find(|e| e.group == BloodGroup::OPos).unwrap();
        assert_eq!(o_pos.drift(), Some(20));
    }
}
