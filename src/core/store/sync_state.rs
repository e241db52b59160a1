//! Per-row synchronization state
//!
//! Every row in a collection carries the state of its last local mutation
//! relative to the remote authority. Consumers see it alongside the record so
//! they can render a "saving" or "not saved" indicator.

use serde::Serialize;
use std::fmt;

/// Mutation operation that produced a row's current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// Synchronization state of one row
#[derive(Debug, Clone, PartialEq)]
pub enum SyncState<T> {
    /// Matches the last record confirmed by the remote authority
    Confirmed,
    /// Inserted locally, create not yet confirmed
    PendingCreate,
    /// Patched locally, update not yet confirmed; `previous` is the record
    /// before the patch
    PendingUpdate { previous: Box<T> },
    /// Delete issued, row kept until the remote authority confirms
    PendingDelete,
    /// The remote authority rejected the last mutation and the local change
    /// was kept
    Failed { operation: Operation, detail: String },
}

impl<T> SyncState<T> {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SyncState::Confirmed)
    }

    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            SyncState::PendingCreate | SyncState::PendingUpdate { .. } | SyncState::PendingDelete
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SyncState::Failed { .. })
    }

    /// Short label for display and logs
    pub fn label(&self) -> &'static str {
        match self {
            SyncState::Confirmed => "confirmed",
            SyncState::PendingCreate => "pending_create",
            SyncState::PendingUpdate { .. } => "pending_update",
            SyncState::PendingDelete => "pending_delete",
            SyncState::Failed { .. } => "failed",
        }
    }
}

/// A record together with its synchronization state and write version
///
/// `confirmed` is the last record the remote authority acknowledged for this
/// row. It only moves on refresh or on a successful remote confirmation, so
/// local writes the authority never accepted do not shift it.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    pub(crate) record: T,
    pub(crate) state: SyncState<T>,
    pub(crate) version: u64,
    pub(crate) confirmed: Option<T>,
}

impl<T: Clone> Row<T> {
    /// New row; a `Confirmed` row starts with its record as the baseline
    pub(crate) fn new(record: T, state: SyncState<T>, version: u64) -> Self {
        let confirmed = state.is_confirmed().then(|| record.clone());
        Self {
            record,
            state,
            version,
            confirmed,
        }
    }
}

impl<T> Row<T> {
    pub fn record(&self) -> &T {
        &self.record
    }

    /// Last record confirmed by the remote authority, `None` until the
    /// row's create is confirmed
    pub fn confirmed(&self) -> Option<&T> {
        self.confirmed.as_ref()
    }

    pub fn state(&self) -> &SyncState<T> {
        &self.state
    }

    /// Store-wide monotonic version of the last write to this record
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn into_record(self) -> T {
        self.record
    }
}
