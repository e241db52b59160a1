//! CRUD Mutator
//!
//! Executes one create, update, or delete against the remote gateway and
//! keeps the store consistent with both the optimistic and the settled
//! outcome.
//!
//! - **create** inserts the record immediately, then reconciles it with the
//!   canonical record (re-keying it if the authority minted a new id)
//! - **update** patches the record immediately, then reconciles it with the
//!   canonical record
//! - **delete** only marks the row; it is removed once the authority confirms
//!
//! A confirmation whose write version predates a newer local write never
//! overwrites that write. The [`Transition`] handed back always starts from
//! the row's last confirmed record, never from a local value the authority
//! has not accepted. Failures are settled according to the configured
//! [`FailurePolicy`] and always surfaced to the caller. Nothing is retried.

mod pending;
pub mod policy;

pub use policy::FailurePolicy;

use crate::adapters::gateway::RemoteGateway;
use crate::core::store::{EntityStore, Operation, Settlement, StoredEntity, SyncState};
use crate::domain::{decode, encode, EntityId, NexusError, Patch, Result};
use pending::PendingMutation;
use std::sync::Arc;

/// A lifecycle transition of one record, as confirmed by the remote authority
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    /// Last confirmed record before the mutation (`None` for a create or a
    /// row never confirmed)
    pub before: Option<T>,
    /// Record after the mutation (`None` for a delete)
    pub after: Option<T>,
}

impl<T> Transition<T> {
    pub fn created(record: T) -> Self {
        Self {
            before: None,
            after: Some(record),
        }
    }

    pub fn updated(before: T, after: T) -> Self {
        Self {
            before: Some(before),
            after: Some(after),
        }
    }

    pub fn deleted(before: Option<T>) -> Self {
        Self {
            before,
            after: None,
        }
    }

    /// Confirmation moving the authority's record from `before` to `after`
    fn confirmed(before: Option<T>, after: T) -> Self {
        Self {
            before,
            after: Some(after),
        }
    }
}

impl<T: Clone> Transition<T> {
    /// Confirmation for a row no longer held locally; carries the record but
    /// no change
    fn unchanged(record: T) -> Self {
        Self {
            before: Some(record.clone()),
            after: Some(record),
        }
    }
}

/// Generic create/update/delete executor over the store and a gateway
pub struct CrudMutator {
    store: Arc<EntityStore>,
    gateway: Arc<dyn RemoteGateway>,
    policy: FailurePolicy,
}

impl CrudMutator {
    pub fn new(store: Arc<EntityStore>, gateway: Arc<dyn RemoteGateway>, policy: FailurePolicy) -> Self {
        Self {
            store,
            gateway,
            policy,
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Creates a record
    ///
    /// The record is visible in the store as soon as this is called, before
    /// the remote call settles.
    ///
    /// # Errors
    ///
    /// - `DuplicateId` if the id is already present locally (nothing is sent)
    /// - `Remote` if the authority refuses the record; the optimistic row is
    ///   then settled per the failure policy
    pub async fn create<T: StoredEntity>(&self, item: T) -> Result<Transition<T>> {
        let local_id = item.id().clone();
        let payload = encode(&item)?;

        let version = self
            .store
            .stage_create(item)
            .map_err(|e| local_failure::<T>(&local_id, Operation::Create, e))?;
        tracing::debug!(kind = %T::KIND, id = %local_id, version, "Create applied optimistically");

        let pending = PendingMutation::<T>::Create {
            id: local_id.clone(),
            version,
        };

        let canonical = match self
            .gateway
            .create(T::KIND, payload)
            .await
            .and_then(decode::<T>)
        {
            Ok(record) => record,
            Err(error) => return Err(pending.fail(&self.store, self.policy, error)),
        };

        let (settlement, baseline) = match self.store.confirm(&local_id, canonical.clone(), version) {
            Ok(confirmed) => confirmed,
            Err(e) => {
                // the authority holds the record but it cannot be mirrored
                self.store.mark::<T>(
                    &local_id,
                    Some(version),
                    SyncState::Failed {
                        operation: Operation::Create,
                        detail: e.to_string(),
                    },
                );
                return Err(local_failure::<T>(&local_id, Operation::Create, e));
            }
        };
        log_confirmation(&settlement, &local_id, canonical.id(), Operation::Create);

        Ok(settled(settlement, baseline, canonical))
    }

    /// Applies a partial update
    ///
    /// The patch is visible in the store as soon as this is called, before
    /// the remote call settles.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id is absent locally (nothing is sent)
    /// - `Validation` if the patch does not fit the record schema
    /// - `Remote` if the authority refuses the update; the optimistic patch is
    ///   then settled per the failure policy
    pub async fn update<T: StoredEntity>(&self, id: &EntityId, patch: Patch) -> Result<Transition<T>> {
        let (prior, _optimistic, version) = self
            .store
            .stage_update::<T>(id, &patch)
            .map_err(|e| local_failure::<T>(id, Operation::Update, e))?;
        tracing::debug!(
            kind = %T::KIND,
            id = %id,
            version,
            fields = patch.len(),
            "Update applied optimistically"
        );

        let pending = PendingMutation::Update {
            id: id.clone(),
            prior,
            version,
        };

        let canonical = match self
            .gateway
            .update(T::KIND, id, &patch)
            .await
            .and_then(decode::<T>)
        {
            Ok(record) => record,
            Err(error) => return Err(pending.fail(&self.store, self.policy, error)),
        };

        let (settlement, baseline) = self
            .store
            .confirm(id, canonical.clone(), version)
            .map_err(|e| local_failure::<T>(id, Operation::Update, e))?;
        log_confirmation(&settlement, id, canonical.id(), Operation::Update);

        Ok(settled(settlement, baseline, canonical))
    }

    /// Deletes a record
    ///
    /// Not optimistic: the row stays in the store, marked pending, until the
    /// authority confirms. Deleting an id that is not held locally still
    /// asks the authority.
    ///
    /// # Errors
    ///
    /// Returns `Remote` if the authority refuses the delete; the row is kept.
    pub async fn delete<T: StoredEntity>(&self, id: &EntityId) -> Result<Transition<T>> {
        let prior = self.store.stage_delete::<T>(id);
        if prior.is_none() {
            tracing::debug!(kind = %T::KIND, id = %id, "Delete issued for a record not held locally");
        }

        let result = self.gateway.delete(T::KIND, id).await;
        match (result, prior) {
            (Ok(ack), prior) => {
                let removed = self.store.remove_row::<T>(id);
                tracing::debug!(kind = %T::KIND, id = %id, detail = %ack.detail, "Delete confirmed");
                Ok(Transition::deleted(removed.or(prior).and_then(|row| row.confirmed)))
            }
            (Err(error), Some(prior)) => {
                let pending = PendingMutation::Delete {
                    id: id.clone(),
                    prior,
                };
                Err(pending.fail(&self.store, self.policy, error))
            }
            (Err(error), None) => {
                tracing::warn!(kind = %T::KIND, id = %id, error = %error, "Remote rejected delete");
                Err(NexusError::Remote(error))
            }
        }
    }
}

fn settled<T: Clone>(settlement: Settlement<T>, baseline: Option<T>, canonical: T) -> Transition<T> {
    match settlement {
        Settlement::Vanished => Transition::unchanged(canonical),
        Settlement::Applied(_) | Settlement::Superseded => Transition::confirmed(baseline, canonical),
    }
}

fn log_confirmation<T: StoredEntity>(
    settlement: &Settlement<T>,
    local_id: &EntityId,
    remote_id: &EntityId,
    operation: Operation,
) {
    match settlement {
        Settlement::Applied(_) => tracing::debug!(
            kind = %T::KIND,
            id = %remote_id,
            local_id = %local_id,
            operation = %operation,
            "Mutation confirmed"
        ),
        Settlement::Superseded => tracing::debug!(
            kind = %T::KIND,
            id = %remote_id,
            local_id = %local_id,
            operation = %operation,
            "Confirmation predates a newer local write; canonical record not applied"
        ),
        Settlement::Vanished => tracing::debug!(
            kind = %T::KIND,
            id = %remote_id,
            operation = %operation,
            "Confirmation for a row no longer present"
        ),
    }
}

/// Logs a failure raised before or after the remote call; local invariant
/// violations are defects and logged loudly
fn local_failure<T: StoredEntity>(id: &EntityId, operation: Operation, error: NexusError) -> NexusError {
    if error.is_local_defect() {
        tracing::error!(kind = %T::KIND, id = %id, operation = %operation, error = %error, "Store invariant violation");
    } else {
        tracing::warn!(kind = %T::KIND, id = %id, operation = %operation, error = %error, "Mutation rejected locally");
    }
    error
}
