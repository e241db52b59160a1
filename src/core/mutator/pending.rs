//! In-flight mutations
//!
//! A [`PendingMutation`] exists only between the optimistic store write and
//! the remote outcome. It remembers what is needed to settle a failure; it is
//! never stored or handed to consumers.

use super::policy::FailurePolicy;
use crate::core::store::{EntityStore, Operation, Row, Settlement, StoredEntity, SyncState};
use crate::domain::{EntityId, NexusError, RemoteError};

pub(crate) enum PendingMutation<T> {
    Create { id: EntityId, version: u64 },
    Update { id: EntityId, prior: Row<T>, version: u64 },
    Delete { id: EntityId, prior: Row<T> },
}

impl<T: StoredEntity> PendingMutation<T> {
    pub(crate) fn operation(&self) -> Operation {
        match self {
            PendingMutation::Create { .. } => Operation::Create,
            PendingMutation::Update { .. } => Operation::Update,
            PendingMutation::Delete { .. } => Operation::Delete,
        }
    }

    /// Settles a mutation the remote authority refused and returns the error
    /// to surface to the caller
    pub(crate) fn fail(self, store: &EntityStore, policy: FailurePolicy, error: RemoteError) -> NexusError {
        let operation = self.operation();
        let failed = || SyncState::Failed {
            operation,
            detail: error.detail(),
        };

        let (id, settlement) = match (policy, self) {
            (FailurePolicy::Rollback, PendingMutation::Create { id, version }) => {
                let settlement = store.discard::<T>(&id, version);
                (id, settlement)
            }
            (FailurePolicy::Rollback, PendingMutation::Update { id, prior, version }) => {
                let settlement = store.revert(&id, prior, version);
                (id, settlement)
            }
            (FailurePolicy::Rollback, PendingMutation::Delete { id, prior }) => {
                let settlement = store.mark(&id, Some(prior.version), prior.state);
                (id, settlement)
            }
            (FailurePolicy::KeepAndMark, PendingMutation::Create { id, version })
            | (FailurePolicy::KeepAndMark, PendingMutation::Update { id, version, .. }) => {
                let settlement = store.mark(&id, Some(version), failed());
                (id, settlement)
            }
            (FailurePolicy::KeepAndMark, PendingMutation::Delete { id, prior }) => {
                let settlement = store.mark(&id, Some(prior.version), failed());
                (id, settlement)
            }
        };

        match settlement {
            Settlement::Applied(_) => tracing::warn!(
                kind = %T::KIND,
                id = %id,
                operation = %operation,
                policy = %policy,
                error = %error,
                "Remote rejected mutation"
            ),
            Settlement::Superseded => tracing::warn!(
                kind = %T::KIND,
                id = %id,
                operation = %operation,
                error = %error,
                "Remote rejected mutation; newer local write kept"
            ),
            Settlement::Vanished => tracing::debug!(
                kind = %T::KIND,
                id = %id,
                operation = %operation,
                error = %error,
                "Remote rejected mutation for a row no longer present"
            ),
        }

        NexusError::Remote(error)
    }
}
