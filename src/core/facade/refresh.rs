//! Bulk refresh reporting

use crate::domain::EntityKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A collection that was replaced by a refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshedKind {
    pub kind: EntityKind,
    pub records: usize,
}

/// A collection that could not be refreshed and was left unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshFailure {
    pub kind: EntityKind,
    pub error: String,
}

/// Outcome of one `refresh_all`
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub refreshed: Vec<RefreshedKind>,
    pub failed: Vec<RefreshFailure>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration: Duration,
}

impl RefreshReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            refreshed: Vec::new(),
            failed: Vec::new(),
            started_at,
            completed_at: None,
            duration: Duration::from_secs(0),
        }
    }

    pub fn add_refreshed(&mut self, kind: EntityKind, records: usize) {
        self.refreshed.push(RefreshedKind { kind, records });
    }

    pub fn add_failure(&mut self, kind: EntityKind, error: impl Into<String>) {
        self.failed.push(RefreshFailure {
            kind,
            error: error.into(),
        });
    }

    /// Stamp completion time and duration
    pub fn finish(mut self, duration: Duration) -> Self {
        self.completed_at = Some(Utc::now());
        self.duration = duration;
        self
    }

    /// Whether every collection was replaced
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.failed.iter().map(|failure| failure.kind)
    }

    pub fn total_records(&self) -> usize {
        self.refreshed.iter().map(|r| r.records).sum()
    }
}

/// Marks a refresh in progress for as long as it lives
pub(crate) struct LoadingGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
