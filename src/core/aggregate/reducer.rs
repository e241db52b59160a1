//! Transition to aggregate delta
//!
//! A record contributes one unit to the aggregate of its inventory key while
//! it is active. The delta of any transition is therefore
//! `contribution(after) - contribution(before)` per group, which covers every
//! lifecycle step with one rule:
//!
//! | transition                          | delta          |
//! |-------------------------------------|----------------|
//! | create active bag                   | +1             |
//! | active → terminal (used/expired/…)  | −1             |
//! | terminal → active                   | +1             |
//! | group change while active           | −1 old, +1 new |
//! | delete active bag                   | −1             |
//!
//! A transition starts from the row's last confirmed record, so each
//! confirmation moves the aggregate from the previous confirmed state to the
//! new one. Refused mutations never produce a transition.

use crate::core::mutator::Transition;
use crate::domain::records::BloodGroup;
use crate::domain::Entity;
use std::collections::BTreeMap;

/// Net change of active unit count per category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryDelta(BTreeMap<BloodGroup, i64>);

impl InventoryDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to a group's delta
    pub fn add(&mut self, group: BloodGroup, amount: i64) {
        let entry = self.0.entry(group).or_insert(0);
        *entry += amount;
        if *entry == 0 {
            self.0.remove(&group);
        }
    }

    pub fn get(&self, group: BloodGroup) -> i64 {
        self.0.get(&group).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-zero entries, in blood group order
    pub fn iter(&self) -> impl Iterator<Item = (BloodGroup, i64)> + '_ {
        self.0.iter().map(|(group, amount)| (*group, *amount))
    }
}

/// Aggregate delta produced by a confirmed transition of any record type
pub fn reduce<T: Entity>(transition: &Transition<T>) -> InventoryDelta {
    let mut delta = InventoryDelta::new();
    if let Some(group) = transition.before.as_ref().and_then(T::inventory_key) {
        delta.add(group, -1);
    }
    if let Some(group) = transition.after.as_ref().and_then(T::inventory_key) {
        delta.add(group, 1);
    }
    delta
}
