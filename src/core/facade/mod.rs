//! Synchronizer Facade
//!
//! [`Synchronizer`] is the single access point for UI surfaces: every
//! collection, the bound create/update/delete operations, bulk refresh, and
//! the loading flag. It owns no business rules; it wires the store, the
//! mutator, and the aggregate maintainer together.
//!
//! # Example
//!
//! ```rust,no_run
//! use nexus::adapters::gateway::InMemoryGateway;
//! use nexus::core::facade::Synchronizer;
//! use nexus::domain::records::{BloodUnit, Patient};
//! use std::sync::Arc;
//!
//! # async fn example() -> nexus::domain::Result<()> {
//! let sync = Synchronizer::new(Arc::new(InMemoryGateway::seeded()));
//!
//! let report = sync.refresh_all().await;
//! assert!(report.is_complete());
//!
//! for unit in sync.list::<BloodUnit>() {
//!     println!("{} {} bags ({})", unit.group, unit.bags, unit.status);
//! }
//! println!("{} patients", sync.list::<Patient>().len());
//! # Ok(())
//! # }
//! ```

pub mod refresh;
pub mod stats;

pub use refresh::{RefreshFailure, RefreshReport, RefreshedKind};
pub use stats::DashboardStats;

use crate::adapters::gateway::{create_gateway, RemoteGateway};
use crate::config::NexusConfig;
use crate::core::aggregate::{AggregateMaintainer, InventoryAudit};
use crate::core::mutator::{CrudMutator, FailurePolicy, Transition};
use crate::core::store::{EntityStore, Row, StoredEntity};
use crate::domain::records::{Bed, BedStatus, BloodUnit, Task, TaskStatus};
use crate::domain::{EntityId, EntityKind, NexusError, Patch, Result};
use chrono::Utc;
use futures::future::join_all;
use parking_lot::Mutex;
use refresh::LoadingGuard;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Domain-state synchronizer for the operations console
pub struct Synchronizer {
    store: Arc<EntityStore>,
    gateway: Arc<dyn RemoteGateway>,
    mutator: CrudMutator,
    aggregates: AggregateMaintainer,
    loading: AtomicUsize,
    last_refresh: Mutex<Option<RefreshReport>>,
}

impl Synchronizer {
    /// Creates a synchronizer with an empty store, the default failure policy
    /// and local-only aggregate maintenance
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        let store = Arc::new(EntityStore::new());
        Self {
            mutator: CrudMutator::new(store.clone(), gateway.clone(), FailurePolicy::default()),
            aggregates: AggregateMaintainer::new(store.clone()),
            store,
            gateway,
            loading: AtomicUsize::new(0),
            last_refresh: Mutex::new(None),
        }
    }

    /// Creates a synchronizer from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway cannot be built from the configuration.
    pub fn from_config(config: &NexusConfig) -> Result<Self> {
        let gateway = create_gateway(&config.gateway)?;
        Ok(Self::new(gateway)
            .with_failure_policy(config.sync.failure_policy)
            .with_aggregate_push(config.sync.push_aggregates))
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.mutator = CrudMutator::new(self.store.clone(), self.gateway.clone(), policy);
        self
    }

    /// Also send aggregate adjustments to the remote authority
    pub fn with_aggregate_push(mut self, enabled: bool) -> Self {
        let maintainer = AggregateMaintainer::new(self.store.clone());
        self.aggregates = if enabled {
            maintainer.with_push(self.gateway.clone())
        } else {
            maintainer
        };
        self
    }

    pub fn store(&self) -> &Arc<EntityStore> {
        &self.store
    }

    pub fn gateway(&self) -> &Arc<dyn RemoteGateway> {
        &self.gateway
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.mutator.policy()
    }

    /// Current records of one collection, most recent first
    pub fn list<T: StoredEntity>(&self) -> Vec<T> {
        self.store.list()
    }

    /// Current rows of one collection, with their sync state
    pub fn rows<T: StoredEntity>(&self) -> Vec<Row<T>> {
        self.store.rows()
    }

    pub fn get<T: StoredEntity>(&self, id: &EntityId) -> Option<T> {
        self.store.get(id)
    }

    /// Receiver notified after every store write
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }

    /// Creates a record and returns it as confirmed by the authority
    ///
    /// # Errors
    ///
    /// See [`CrudMutator::create`].
    pub async fn add<T: StoredEntity>(&self, item: T) -> Result<T> {
        let transition = self.mutator.create(item).await?;
        self.aggregates.on_transition(&transition).await;
        confirmed_record(transition)
    }

    /// Applies a partial update and returns the record as confirmed
    ///
    /// # Errors
    ///
    /// See [`CrudMutator::update`].
    pub async fn update<T: StoredEntity>(&self, id: &EntityId, patch: Patch) -> Result<T> {
        let transition = self.mutator.update::<T>(id, patch).await?;
        self.aggregates.on_transition(&transition).await;
        confirmed_record(transition)
    }

    /// Deletes a record once the authority confirms
    ///
    /// # Errors
    ///
    /// See [`CrudMutator::delete`].
    pub async fn delete<T: StoredEntity>(&self, id: &EntityId) -> Result<()> {
        let transition = self.mutator.delete::<T>(id).await?;
        self.aggregates.on_transition(&transition).await;
        Ok(())
    }

    pub async fn update_task_status(&self, id: &EntityId, status: TaskStatus) -> Result<Task> {
        let patch = Patch::new().set_serialized("status", &status)?;
        self.update::<Task>(id, patch).await
    }

    pub async fn update_bed_status(&self, id: &EntityId, status: BedStatus) -> Result<Bed> {
        let patch = Patch::new().set_serialized("status", &status)?;
        self.update::<Bed>(id, patch).await
    }

    /// Fetches every collection concurrently and replaces each one that
    /// succeeded. Collections whose fetch (or parse) failed keep their
    /// previous contents.
    pub async fn refresh_all(&self) -> RefreshReport {
        let _loading = LoadingGuard::enter(&self.loading);
        let timer = Instant::now();
        let mut report = RefreshReport::new(Utc::now());

        tracing::info!(
            kinds = EntityKind::ALL.len(),
            gateway = %self.gateway.describe(),
            "Refreshing all collections"
        );

        let fetches = EntityKind::ALL.iter().map(|kind| {
            let gateway = self.gateway.clone();
            let kind = *kind;
            async move { (kind, gateway.list(kind).await) }
        });
        let results = join_all(fetches).await;

        for (kind, result) in results {
            let replaced = result
                .map_err(NexusError::from)
                .and_then(|values| self.store.replace_from_payload(kind, values));
            match replaced {
                Ok(count) => report.add_refreshed(kind, count),
                Err(e) => {
                    tracing::warn!(kind = %kind, error = %e, "Refresh failed; collection left unchanged");
                    report.add_failure(kind, e.detail());
                }
            }
        }

        let report = report.finish(timer.elapsed());
        tracing::info!(
            refreshed = report.refreshed.len(),
            failed = report.failed.len(),
            records = report.total_records(),
            duration_ms = report.duration.as_millis() as u64,
            "Refresh finished"
        );

        *self.last_refresh.lock() = Some(report.clone());
        report
    }

    /// True from the start of `refresh_all` until all its fetches settle
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst) > 0
    }

    pub fn last_refresh(&self) -> Option<RefreshReport> {
        self.last_refresh.lock().clone()
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_store(&self.store)
    }

    /// Per-group blood unit aggregates
    pub fn inventory(&self) -> Vec<BloodUnit> {
        self.store.list()
    }

    pub fn audit_inventory(&self) -> InventoryAudit {
        InventoryAudit::from_store(&self.store)
    }

    /// Aggregate lookups that found no row for their group
    pub fn aggregate_lookup_misses(&self) -> u64 {
        self.aggregates.lookup_misses()
    }
}

fn confirmed_record<T: StoredEntity>(transition: Transition<T>) -> Result<T> {
    transition.after.ok_or_else(|| {
        NexusError::Other(format!("{} mutation confirmed without a record", T::KIND))
    })
}
