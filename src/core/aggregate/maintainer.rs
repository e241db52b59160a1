//! Applies aggregate deltas to the per-group blood units

use super::reducer::{reduce, InventoryDelta};
use super::threshold::{tier, StockTier};
use crate::adapters::gateway::RemoteGateway;
use crate::core::mutator::Transition;
use crate::core::store::EntityStore;
use crate::domain::records::{BloodGroup, BloodUnit};
use crate::domain::{Entity, EntityId, EntityKind, Patch};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// One aggregate row moved from `from` to `to` bags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    pub group: BloodGroup,
    pub unit_id: EntityId,
    pub from: u32,
    pub to: u32,
    pub status: StockTier,
}

/// Outcome of maintaining one group's aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateOutcome {
    Adjusted(Adjustment),
    /// No aggregate row exists for the group; the triggering mutation stands
    LookupMiss { group: BloodGroup },
}

/// Keeps blood unit aggregates consistent with confirmed bag transitions
pub struct AggregateMaintainer {
    store: Arc<EntityStore>,
    push: Option<Arc<dyn RemoteGateway>>,
    lookup_misses: AtomicU64,
}

impl AggregateMaintainer {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self {
            store,
            push: None,
            lookup_misses: AtomicU64::new(0),
        }
    }

    /// Also send every adjustment to the remote authority
    pub fn with_push(mut self, gateway: Arc<dyn RemoteGateway>) -> Self {
        self.push = Some(gateway);
        self
    }

    /// Number of lookup misses since creation
    pub fn lookup_misses(&self) -> u64 {
        self.lookup_misses.load(Ordering::Relaxed)
    }

    /// Reacts to a confirmed transition of any record type. Transitions that
    /// do not touch inventory produce no outcomes.
    pub async fn on_transition<T: Entity>(&self, transition: &Transition<T>) -> Vec<AggregateOutcome> {
        let delta = reduce(transition);
        if delta.is_empty() {
            return Vec::new();
        }

        let outcomes = self.apply_delta(&delta);
        if let Some(gateway) = &self.push {
            for outcome in &outcomes {
                if let AggregateOutcome::Adjusted(adjustment) = outcome {
                    push_adjustment(gateway.as_ref(), adjustment).await;
                }
            }
        }
        outcomes
    }

    /// Applies a delta to the local aggregate rows
    pub fn apply_delta(&self, delta: &InventoryDelta) -> Vec<AggregateOutcome> {
        delta
            .iter()
            .map(|(group, amount)| self.adjust(group, amount))
            .collect()
    }

    fn adjust(&self, group: BloodGroup, amount: i64) -> AggregateOutcome {
        let Some(unit_id) = self.store.find::<BloodUnit>(|unit| unit.group == group) else {
            return self.miss(group, None);
        };

        let result = self.store.patch_with::<BloodUnit>(&unit_id, |unit| {
            let to = shift(unit.bags, amount);
            Patch::new()
                .set("bags", to)
                .set("status", tier(to).as_str())
        });

        match result {
            Ok((before, after, _)) => {
                tracing::debug!(
                    group = %group,
                    id = %unit_id,
                    from = before.bags,
                    to = after.bags,
                    status = %after.status,
                    "Aggregate adjusted"
                );
                AggregateOutcome::Adjusted(Adjustment {
                    group,
                    unit_id,
                    from: before.bags,
                    to: after.bags,
                    status: after.status,
                })
            }
            Err(e) => self.miss(group, Some(e.to_string())),
        }
    }

    fn miss(&self, group: BloodGroup, error: Option<String>) -> AggregateOutcome {
        self.lookup_misses.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            group = %group,
            error = error.as_deref().unwrap_or("no aggregate row"),
            "Aggregate lookup miss; unit mutation kept"
        );
        AggregateOutcome::LookupMiss { group }
    }
}

fn shift(count: u32, amount: i64) -> u32 {
    let shifted = i64::from(count).saturating_add(amount).max(0);
    u32::try_from(shifted).unwrap_or(u32::MAX)
}

async fn push_adjustment(gateway: &dyn RemoteGateway, adjustment: &Adjustment) {
    let patch = Patch::new()
        .set("bags", adjustment.to)
        .set("status", adjustment.status.as_str());
    if let Err(error) = gateway
        .update(EntityKind::BloodUnits, &adjustment.unit_id, &patch)
        .await
    {
        tracing::warn!(
            group = %adjustment.group,
            id = %adjustment.unit_id,
            error = %error,
            "Failed to push aggregate adjustment"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_unit(group: BloodGroup, bags: u32) -> Arc<EntityStore> {
        let store = Arc::new(EntityStore::new());
        store
            .insert_front(BloodUnit::new(EntityId::new("BU-1").unwrap(), group, bags))
            .unwrap();
        store
    }

    #[test]
    fn test_shift_saturates() {
        assert_eq!(shift(0, -1), 0);
        assert_eq!(shift(4, 1), 5);
        assert_eq!(shift(u32::MAX, 1), u32::MAX);
    }

    #[test]
    fn test_apply_delta_recomputes_status() {
        let store = store_with_unit(BloodGroup::ONeg, 2);
        let maintainer = AggregateMaintainer::new(store.clone());

        let mut delta = InventoryDelta::new();
        delta.add(BloodGroup::ONeg, 1);
        let outcomes = maintainer.apply_delta(&delta);

        assert_eq!(outcomes.len(), 1);
        let unit = store.get::<BloodUnit>(&EntityId::new("BU-1").unwrap()).unwrap();
        assert_eq!(unit.bags, 3);
        assert_eq!(unit.status, StockTier::Low);
    }

    #[test]
    fn test_missing_group_is_soft() {
        let store = store_with_unit(BloodGroup::APos, 12);
        let maintainer = AggregateMaintainer::new(store);

        let mut delta = InventoryDelta::new();
        delta.add(BloodGroup::BNeg, 1);
        let outcomes = maintainer.apply_delta(&delta);

        assert_eq!(
            outcomes,
            vec![AggregateOutcome::LookupMiss {
                group: BloodGroup::BNeg
            }]
        );
        assert_eq!(maintainer.lookup_misses(), 1);
    }
}
