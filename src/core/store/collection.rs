//! Ordered, id-unique collection of one entity kind
//!
//! Front of the vector is "most recent first". Every primitive checks id
//! uniqueness before it writes, so no sequence of calls can produce two rows
//! with the same id.

use super::sync_state::{Row, SyncState};
use crate::domain::{Entity, EntityId, NexusError, Patch, Result};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Collection<T> {
    rows: Vec<Row<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: Entity> Collection<T> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    pub fn records(&self) -> Vec<T> {
        self.rows.iter().map(|row| row.record.clone()).collect()
    }

    pub fn get(&self, id: &EntityId) -> Option<&Row<T>> {
        self.rows.iter().find(|row| row.record.id() == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &EntityId) -> Option<usize> {
        self.rows.iter().position(|row| row.record.id() == id)
    }

    fn get_mut(&mut self, id: &EntityId) -> Result<&mut Row<T>> {
        self.rows
            .iter_mut()
            .find(|row| row.record.id() == id)
            .ok_or_else(|| NexusError::NotFound {
                kind: T::KIND,
                id: id.clone(),
            })
    }

    /// Total replacement, in delivered order. Fails without touching the
    /// collection if the delivered items repeat an id.
    pub(crate) fn replace_all(
        &mut self,
        items: Vec<T>,
        mut next_version: impl FnMut() -> u64,
    ) -> Result<()> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id().clone()) {
                return Err(NexusError::DuplicateId {
                    kind: T::KIND,
                    id: item.id().clone(),
                });
            }
        }

        self.rows = items
            .into_iter()
            .map(|record| Row::new(record, SyncState::Confirmed, next_version()))
            .collect();
        Ok(())
    }

    pub(crate) fn insert_front(&mut self, row: Row<T>) -> Result<()> {
        if self.contains(row.record.id()) {
            return Err(NexusError::DuplicateId {
                kind: T::KIND,
                id: row.record.id().clone(),
            });
        }
        self.rows.insert(0, row);
        Ok(())
    }

    /// Shallow-merges `patch` into the row and returns the row as it was
    /// before the patch
    pub(crate) fn patch(&mut self, id: &EntityId, patch: &Patch, version: u64) -> Result<Row<T>> {
        let row = self.get_mut(id)?;
        let patched = patch.apply(&row.record)?;
        let prior = row.clone();
        row.record = patched;
        row.version = version;
        Ok(prior)
    }

    pub(crate) fn set_state(&mut self, id: &EntityId, state: SyncState<T>) -> Result<()> {
        self.get_mut(id)?.state = state;
        Ok(())
    }

    /// Overwrites record and state of an existing row; the confirmed
    /// baseline is left as it is
    pub(crate) fn replace(&mut self, id: &EntityId, record: T, state: SyncState<T>, version: u64) -> Result<()> {
        if record.id() != id && self.contains(record.id()) {
            return Err(NexusError::DuplicateId {
                kind: T::KIND,
                id: record.id().clone(),
            });
        }
        let row = self.get_mut(id)?;
        row.record = record;
        row.state = state;
        row.version = version;
        Ok(())
    }

    /// Records `canonical` as the row's confirmed baseline and returns the
    /// baseline it replaces
    pub(crate) fn settle_baseline(&mut self, id: &EntityId, canonical: T) -> Result<Option<T>> {
        Ok(self.get_mut(id)?.confirmed.replace(canonical))
    }

    /// Changes a row's id in place, keeping its position
    pub(crate) fn rekey(&mut self, from: &EntityId, to: EntityId) -> Result<()> {
        if from == &to {
            return Ok(());
        }
        if self.contains(&to) {
            return Err(NexusError::DuplicateId { kind: T::KIND, id: to });
        }
        self.get_mut(from)?.record.set_id(to);
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: &EntityId) -> Option<Row<T>> {
        self.position(id).map(|index| self.rows.remove(index))
    }
}
