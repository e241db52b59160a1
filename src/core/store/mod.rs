//! Entity Store
//!
//! In-memory mirror of every collection fetched from the remote authority.
//! The store is the only shared mutable resource in the synchronizer: all
//! writes go through the primitives below, which take a single lock for the
//! duration of one synchronous operation. No lock is ever held across an
//! await point, so store operations are atomic with respect to each other.
//!
//! Every write stamps the row with a store-wide monotonic version. The
//! mutator uses it to recognize confirmations that predate a newer local
//! write.
//!
//! # Example
//!
//! ```rust
//! use nexus::core::store::EntityStore;
//! use nexus::domain::records::{Notice};
//! use nexus::domain::{EntityId, Patch};
//!
//! # fn example() -> nexus::domain::Result<()> {
//! let store = EntityStore::new();
//! store.insert_front(Notice {
//!     id: EntityId::new("1").unwrap(),
//!     title: "Staff Meeting".to_string(),
//!     content: "Friday at 3 PM".to_string(),
//!     date: "Oct 24".to_string(),
//!     priority: "Normal".to_string(),
//! })?;
//!
//! let id = EntityId::new("1").unwrap();
//! store.patch::<Notice>(&id, &Patch::new().set("priority", "Urgent"))?;
//! assert_eq!(store.get::<Notice>(&id).unwrap().priority, "Urgent");
//!
//! // Removing an absent id is not an error
//! store.remove::<Notice>(&EntityId::new("missing-id").unwrap());
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod registry;
pub mod sync_state;

pub use collection::Collection;
pub use registry::{Collections, StoredEntity};
pub use sync_state::{Operation, Row, SyncState};

use crate::domain::{EntityId, EntityKind, NexusError, Patch, Result};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Result of settling a mutation against the row it staged
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Settlement<T> {
    /// The row still carried the mutation's version and was updated
    Applied(T),
    /// A newer local write exists; only the id was aligned (if at all)
    Superseded,
    /// The row is gone (removed or replaced by a refresh)
    Vanished,
}

/// One collection per entity kind, plus change notification
#[derive(Debug)]
pub struct EntityStore {
    collections: RwLock<Collections>,
    next_version: AtomicU64,
    revision: watch::Sender<u64>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            collections: RwLock::new(Collections::default()),
            next_version: AtomicU64::new(0),
            revision,
        }
    }

    fn next_version(&self) -> u64 {
        self.next_version.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn changed(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Receiver of the store revision, bumped after every write
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Snapshot of the records of one collection, most recent first
    pub fn list<T: StoredEntity>(&self) -> Vec<T> {
        T::collection(&self.collections.read()).records()
    }

    /// Snapshot of rows (record, sync state, version) of one collection
    pub fn rows<T: StoredEntity>(&self) -> Vec<Row<T>> {
        T::collection(&self.collections.read()).rows().to_vec()
    }

    pub fn get<T: StoredEntity>(&self, id: &EntityId) -> Option<T> {
        self.row::<T>(id).map(Row::into_record)
    }

    pub fn row<T: StoredEntity>(&self, id: &EntityId) -> Option<Row<T>> {
        T::collection(&self.collections.read()).get(id).cloned()
    }

    pub fn len<T: StoredEntity>(&self) -> usize {
        T::collection(&self.collections.read()).len()
    }

    /// Number of records held for a kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.collections.read().len_of(kind)
    }

    /// Replaces a whole collection with confirmed records, in delivered order
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` (and leaves the collection untouched) if the
    /// delivered items repeat an id.
    pub fn replace_all<T: StoredEntity>(&self, items: Vec<T>) -> Result<()> {
        {
            let mut collections = self.collections.write();
            T::collection_mut(&mut collections).replace_all(items, || self.next_version())?;
        }
        tracing::debug!(kind = %T::KIND, "Collection replaced");
        self.changed();
        Ok(())
    }

    /// Prepends a confirmed record
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if a record with the same id is present.
    pub fn insert_front<T: StoredEntity>(&self, item: T) -> Result<u64> {
        self.insert_with_state(item, SyncState::Confirmed)
    }

    /// Shallow-merges `patch` into the record, keeping its sync state
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is absent, or a validation error if the
    /// merged record does not fit the schema.
    pub fn patch<T: StoredEntity>(&self, id: &EntityId, patch: &Patch) -> Result<T> {
        let updated = {
            let mut collections = self.collections.write();
            let collection = T::collection_mut(&mut collections);
            let prior = collection.patch(id, patch, self.next_version())?;
            collection
                .get(id)
                .map(|row| row.record.clone())
                .unwrap_or(prior.record)
        };
        self.changed();
        Ok(updated)
    }

    /// Id of the first record (most recent first) matching `predicate`
    pub fn find<T: StoredEntity>(&self, predicate: impl Fn(&T) -> bool) -> Option<EntityId> {
        T::collection(&self.collections.read())
            .rows()
            .iter()
            .find(|row| predicate(&row.record))
            .map(|row| row.record.id().clone())
    }

    /// Builds a patch from the current record and applies it under one lock,
    /// so the read and the write cannot interleave with another writer.
    ///
    /// Returns the record before and after the patch.
    pub fn patch_with<T: StoredEntity>(
        &self,
        id: &EntityId,
        build: impl FnOnce(&T) -> Patch,
    ) -> Result<(T, T, Patch)> {
        let patched = {
            let mut collections = self.collections.write();
            let collection = T::collection_mut(&mut collections);
            let patch = match collection.get(id) {
                Some(row) => build(&row.record),
                None => {
                    return Err(NexusError::NotFound {
                        kind: T::KIND,
                        id: id.clone(),
                    })
                }
            };
            let prior = collection.patch(id, &patch, self.next_version())?;
            let after = collection
                .get(id)
                .map(|row| row.record.clone())
                .unwrap_or_else(|| prior.record.clone());
            (prior.record, after, patch)
        };
        self.changed();
        Ok(patched)
    }

    /// Removes a record; absent ids are a no-op
    pub fn remove<T: StoredEntity>(&self, id: &EntityId) -> Option<T> {
        self.remove_row(id).map(Row::into_record)
    }

    pub(crate) fn remove_row<T: StoredEntity>(&self, id: &EntityId) -> Option<Row<T>> {
        let removed = T::collection_mut(&mut self.collections.write()).remove(id);
        if removed.is_some() {
            self.changed();
        }
        removed
    }

    fn insert_with_state<T: StoredEntity>(&self, item: T, state: SyncState<T>) -> Result<u64> {
        let version = self.next_version();
        T::collection_mut(&mut self.collections.write()).insert_front(Row::new(item, state, version))?;
        self.changed();
        Ok(version)
    }

    /// Optimistic insert of a record whose create is in flight
    pub(crate) fn stage_create<T: StoredEntity>(&self, item: T) -> Result<u64> {
        self.insert_with_state(item, SyncState::PendingCreate)
    }

    /// Optimistic patch of a record whose update is in flight
    ///
    /// Returns the row as it was before the patch, the patched record, and
    /// the version stamped on the write.
    pub(crate) fn stage_update<T: StoredEntity>(
        &self,
        id: &EntityId,
        patch: &Patch,
    ) -> Result<(Row<T>, T, u64)> {
        let version = self.next_version();
        let staged = {
            let mut collections = self.collections.write();
            let collection = T::collection_mut(&mut collections);
            let prior = collection.patch(id, patch, version)?;
            collection.set_state(
                id,
                SyncState::PendingUpdate {
                    previous: Box::new(prior.record.clone()),
                },
            )?;
            let after = collection
                .get(id)
                .map(|row| row.record.clone())
                .unwrap_or_else(|| prior.record.clone());
            (prior, after, version)
        };
        self.changed();
        Ok(staged)
    }

    /// Marks a row as awaiting delete confirmation and returns the row as it
    /// was, or `None` if the id is absent. The version is left unchanged so a
    /// write made while the delete is in flight can be recognized.
    pub(crate) fn stage_delete<T: StoredEntity>(&self, id: &EntityId) -> Option<Row<T>> {
        let prior = {
            let mut collections = self.collections.write();
            let collection = T::collection_mut(&mut collections);
            let prior = collection.get(id)?.clone();
            collection.set_state(id, SyncState::PendingDelete).ok()?;
            prior
        };
        self.changed();
        Some(prior)
    }

    /// Applies the authority's canonical record to the row staged at
    /// `version`. If a newer local write exists, only the id is aligned.
    ///
    /// Either way the canonical record becomes the row's confirmed baseline;
    /// the baseline it replaces is returned alongside the settlement.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the canonical id is already taken by another
    /// row.
    pub(crate) fn confirm<T: StoredEntity>(
        &self,
        id: &EntityId,
        canonical: T,
        version: u64,
    ) -> Result<(Settlement<T>, Option<T>)> {
        let confirmed = {
            let mut collections = self.collections.write();
            let collection = T::collection_mut(&mut collections);
            let Some(current) = collection.get(id).map(|row| row.version) else {
                return Ok((Settlement::Vanished, None));
            };

            let canonical_id = canonical.id().clone();
            let settlement = if current == version {
                let next = self.next_version();
                collection.replace(id, canonical.clone(), SyncState::Confirmed, next)?;
                Settlement::Applied(canonical.clone())
            } else {
                collection.rekey(id, canonical_id.clone())?;
                Settlement::Superseded
            };
            let baseline = collection.settle_baseline(&canonical_id, canonical)?;
            (settlement, baseline)
        };
        self.changed();
        Ok(confirmed)
    }

    /// Puts back the row as it was before the mutation staged at `version`,
    /// keeping the current confirmed baseline
    pub(crate) fn revert<T: StoredEntity>(&self, id: &EntityId, prior: Row<T>, version: u64) -> Settlement<T> {
        let settlement = {
            let mut collections = self.collections.write();
            let collection = T::collection_mut(&mut collections);
            match collection.get(id).map(|row| row.version) {
                None => return Settlement::Vanished,
                Some(current) if current != version => return Settlement::Superseded,
                Some(_) => {}
            }
            let record = prior.record.clone();
            match collection.replace(id, prior.record, prior.state, prior.version) {
                Ok(()) => Settlement::Applied(record),
                Err(_) => Settlement::Vanished,
            }
        };
        self.changed();
        settlement
    }

    /// Removes the row inserted at `version`, unless it was written since
    pub(crate) fn discard<T: StoredEntity>(&self, id: &EntityId, version: u64) -> Settlement<T> {
        let removed = {
            let mut collections = self.collections.write();
            let collection = T::collection_mut(&mut collections);
            match collection.get(id).map(|row| row.version) {
                None => return Settlement::Vanished,
                Some(current) if current != version => return Settlement::Superseded,
                Some(_) => collection.remove(id),
            }
        };
        self.changed();
        match removed {
            Some(row) => Settlement::Applied(row.record),
            None => Settlement::Vanished,
        }
    }

    /// Sets the row's state if it still carries `version`
    pub(crate) fn mark<T: StoredEntity>(
        &self,
        id: &EntityId,
        version: Option<u64>,
        state: SyncState<T>,
    ) -> Settlement<T> {
        let record = {
            let mut collections = self.collections.write();
            let collection = T::collection_mut(&mut collections);
            let Some((record, current)) = collection
                .get(id)
                .map(|row| (row.record.clone(), row.version))
            else {
                return Settlement::Vanished;
            };
            if version.is_some_and(|expected| expected != current) {
                return Settlement::Superseded;
            }
            if collection.set_state(id, state).is_err() {
                return Settlement::Vanished;
            }
            record
        };
        self.changed();
        Settlement::Applied(record)
    }
}
