//! In-memory remote gateway
//!
//! Serves the demo mode and the test suite. Behaves like the console API
//! (404 on unknown ids, shallow-merge updates, `{"detail": "Deleted"}` on
//! delete) and adds controls the real authority lacks:
//!
//! - a hold gate that parks every call until released, so the optimistic
//!   state can be observed while a call is outstanding
//! - failure injection per (kind, operation), persistent or for the next
//!   call only
//! - server-assigned ids on create
//! - a call log and an in-flight counter

use super::seed;
use super::traits::{DeleteAck, GatewayOp, GatewayResult, RemoteGateway};
use crate::domain::patch::ID_FIELD;
use crate::domain::{EntityId, EntityKind, Patch, RemoteError};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

/// One call received by the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCall {
    pub kind: EntityKind,
    pub op: GatewayOp,
    pub id: Option<EntityId>,
}

/// Remote authority backed by in-process collections
///
/// # Example
///
/// ```rust
/// use nexus::adapters::gateway::{GatewayOp, InMemoryGateway};
/// use nexus::domain::{EntityKind, RemoteError};
///
/// let gateway = InMemoryGateway::seeded().with_server_ids();
/// gateway.fail(
///     EntityKind::BloodBags,
///     GatewayOp::Create,
///     RemoteError::ServerError { status: 500, detail: "Internal Server Error".into() },
/// );
/// assert_eq!(gateway.records(EntityKind::BloodUnits).len(), 8);
/// ```
pub struct InMemoryGateway {
    collections: Mutex<HashMap<EntityKind, Vec<Value>>>,
    failures: Mutex<HashMap<(EntityKind, GatewayOp), RemoteError>>,
    one_shot: Mutex<HashMap<(EntityKind, GatewayOp), VecDeque<RemoteError>>>,
    calls: Mutex<Vec<GatewayCall>>,
    held: watch::Sender<bool>,
    in_flight: AtomicUsize,
    latency: Duration,
    server_ids: bool,
}

impl InMemoryGateway {
    /// Gateway with every collection empty
    pub fn empty() -> Self {
        let (held, _) = watch::channel(false);
        Self {
            collections: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            one_shot: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            held,
            in_flight: AtomicUsize::new(0),
            latency: Duration::ZERO,
            server_ids: false,
        }
    }

    /// Gateway holding the console's fixture data
    pub fn seeded() -> Self {
        let gateway = Self::empty();
        {
            let mut collections = gateway.collections.lock();
            for kind in EntityKind::ALL {
                collections.insert(kind, seed::fixtures(kind));
            }
        }
        gateway
    }

    /// Replaces one collection
    pub fn with_collection(self, kind: EntityKind, records: Vec<Value>) -> Self {
        self.collections.lock().insert(kind, records);
        self
    }

    /// Delay applied to every call
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Mint ids on create instead of keeping the client's
    pub fn with_server_ids(mut self) -> Self {
        self.server_ids = true;
        self
    }

    /// Make every future `op` on `kind` fail with `error`
    pub fn fail(&self, kind: EntityKind, op: GatewayOp, error: RemoteError) {
        self.failures.lock().insert((kind, op), error);
    }

    /// Make the next `op` on `kind` to arrive fail with `error`; queued
    /// errors are handed out in arrival order
    pub fn fail_once(&self, kind: EntityKind, op: GatewayOp, error: RemoteError) {
        self.one_shot
            .lock()
            .entry((kind, op))
            .or_default()
            .push_back(error);
    }

    pub fn clear_failure(&self, kind: EntityKind, op: GatewayOp) {
        self.failures.lock().remove(&(kind, op));
    }

    pub fn clear_failures(&self) {
        self.failures.lock().clear();
        self.one_shot.lock().clear();
    }

    /// Park every call at the gate until [`release`](Self::release)
    pub fn hold(&self) {
        self.held.send_replace(true);
    }

    pub fn release(&self) {
        self.held.send_replace(false);
    }

    /// Calls currently inside the gateway
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Every call received so far, in arrival order
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().clone()
    }

    /// Calls of one operation on one kind
    pub fn calls_to(&self, kind: EntityKind, op: GatewayOp) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.kind == kind && call.op == op)
            .count()
    }

    /// Snapshot of the authority's copy of a collection
    pub fn records(&self, kind: EntityKind) -> Vec<Value> {
        self.collections.lock().get(&kind).cloned().unwrap_or_default()
    }

    /// Authority's copy of one record
    pub fn record(&self, kind: EntityKind, id: &EntityId) -> Option<Value> {
        self.collections
            .lock()
            .get(&kind)
            .and_then(|records| records.iter().find(|r| has_id(r, id)).cloned())
    }

    /// Records the call, then waits for latency and the hold gate, then
    /// reports an injected failure if one is set. A one-shot failure is
    /// claimed on arrival, before the gate.
    async fn enter(&self, kind: EntityKind, op: GatewayOp, id: Option<&EntityId>) -> GatewayResult<()> {
        self.calls.lock().push(GatewayCall {
            kind,
            op,
            id: id.cloned(),
        });
        let claimed = self
            .one_shot
            .lock()
            .get_mut(&(kind, op))
            .and_then(VecDeque::pop_front);
        let _in_flight = InFlight::enter(&self.in_flight);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut gate = self.held.subscribe();
        loop {
            let held = *gate.borrow_and_update();
            if !held || gate.changed().await.is_err() {
                break;
            }
        }

        if let Some(error) = claimed {
            return Err(error);
        }
        match self.failures.lock().get(&(kind, op)) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn mint_id(kind: EntityKind) -> String {
        let prefix = kind.id_prefix();
        if prefix.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            let hex = Uuid::new_v4().simple().to_string().to_uppercase();
            format!("{prefix}{}", &hex[..6])
        }
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::empty()
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn has_id(record: &Value, id: &EntityId) -> bool {
    record.get(ID_FIELD).and_then(Value::as_str) == Some(id.as_str())
}

fn not_found(kind: EntityKind) -> RemoteError {
    RemoteError::Rejected {
        status: 404,
        detail: format!("{} not found", kind.label()),
    }
}

#[async_trait]
impl RemoteGateway for InMemoryGateway {
    async fn list(&self, kind: EntityKind) -> GatewayResult<Vec<Value>> {
        self.enter(kind, GatewayOp::List, None).await?;
        Ok(self.records(kind))
    }

    async fn get(&self, kind: EntityKind, id: &EntityId) -> GatewayResult<Value> {
        self.enter(kind, GatewayOp::Get, Some(id)).await?;
        self.record(kind, id).ok_or_else(|| not_found(kind))
    }

    async fn create(&self, kind: EntityKind, record: Value) -> GatewayResult<Value> {
        self.enter(kind, GatewayOp::Create, None).await?;

        let Value::Object(mut fields) = record else {
            return Err(RemoteError::Rejected {
                status: 422,
                detail: "Request body must be a JSON object".to_string(),
            });
        };

        if self.server_ids {
            fields.insert(ID_FIELD.to_string(), Value::String(Self::mint_id(kind)));
        }

        let id = fields
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RemoteError::Rejected {
                status: 422,
                detail: "Field 'id' is required".to_string(),
            })?;

        let record = Value::Object(fields);
        let mut collections = self.collections.lock();
        let records = collections.entry(kind).or_default();
        if records
            .iter()
            .any(|r| r.get(ID_FIELD).and_then(Value::as_str) == Some(id.as_str()))
        {
            return Err(RemoteError::Rejected {
                status: 409,
                detail: format!("{} {} already exists", kind.label(), id),
            });
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, kind: EntityKind, id: &EntityId, patch: &Patch) -> GatewayResult<Value> {
        self.enter(kind, GatewayOp::Update, Some(id)).await?;

        let mut collections = self.collections.lock();
        let record = collections
            .get_mut(&kind)
            .and_then(|records| records.iter_mut().find(|r| has_id(r, id)))
            .ok_or_else(|| not_found(kind))?;

        if let (Value::Object(target), Value::Object(changes)) = (&mut *record, patch.to_value()) {
            for (field, value) in changes {
                if field != ID_FIELD {
                    target.insert(field, value);
                }
            }
        }
        Ok(record.clone())
    }

    async fn delete(&self, kind: EntityKind, id: &EntityId) -> GatewayResult<DeleteAck> {
        self.enter(kind, GatewayOp::Delete, Some(id)).await?;

        let mut collections = self.collections.lock();
        let records = collections.get_mut(&kind).ok_or_else(|| not_found(kind))?;
        let position = records
            .iter()
            .position(|r| has_id(r, id))
            .ok_or_else(|| not_found(kind))?;
        records.remove(position);
        Ok(DeleteAck::new("Deleted"))
    }

    fn describe(&self) -> String {
        if self.latency.is_zero() {
            "demo (in-memory)".to_string()
        } else {
            format!("demo (in-memory, {} ms latency)", self.latency.as_millis())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn id(raw: &str) -> EntityId {
        EntityId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn test_seeded_lists_fixtures() {
        let gateway = InMemoryGateway::seeded();
        let beds = gateway.list(EntityKind::Beds).await.unwrap();
        assert_eq!(beds.len(), 12);
        assert_eq!(gateway.calls_to(EntityKind::Beds, GatewayOp::List), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_is_404() {
        let gateway = InMemoryGateway::seeded();
        let err = gateway.get(EntityKind::Patients, &id("P-999")).await.unwrap_err();
        assert_eq!(
            err,
            RemoteError::Rejected {
                status: 404,
                detail: "Patients not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_create_mints_prefixed_id() {
        let gateway = InMemoryGateway::empty().with_server_ids();
        let created = gateway
            .create(EntityKind::BloodBags, json!({"id": "LOCAL-1", "blood_group": "O+"}))
            .await
            .unwrap();

        let minted = created["id"].as_str().unwrap();
        assert!(minted.starts_with("BB-"));
        assert_eq!(minted.len(), "BB-".len() + 6);
        assert_eq!(gateway.records(EntityKind::BloodBags).len(), 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_rejected() {
        let gateway = InMemoryGateway::seeded();
        let err = gateway
            .create(EntityKind::Patients, json!({"id": "P-101", "name": "Again"}))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
    }

    #[tokio::test]
    async fn test_update_merges_and_keeps_id() {
        let gateway = InMemoryGateway::seeded();
        let patch = Patch::new().set("status", "Done").set("id", "7");
        let updated = gateway.update(EntityKind::Tasks, &id("1"), &patch).await.unwrap();

        assert_eq!(updated["status"], "Done");
        assert_eq!(updated["id"], "1");
        assert_eq!(updated["title"], "Review MRI Results for Bed 3");
    }

    #[tokio::test]
    async fn test_delete_acknowledges() {
        let gateway = InMemoryGateway::seeded();
        let ack = gateway.delete(EntityKind::Notices, &id("2")).await.unwrap();
        assert_eq!(ack.detail, "Deleted");
        assert_eq!(gateway.records(EntityKind::Notices).len(), 2);

        let err = gateway.delete(EntityKind::Notices, &id("2")).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let gateway = InMemoryGateway::seeded();
        gateway.fail(
            EntityKind::Tasks,
            GatewayOp::List,
            RemoteError::ConnectionFailed("refused".to_string()),
        );
        assert!(gateway.list(EntityKind::Tasks).await.is_err());
        assert!(gateway.list(EntityKind::Beds).await.is_ok());

        gateway.clear_failures();
        assert!(gateway.list(EntityKind::Tasks).await.is_ok());
    }

    #[tokio::test]
    async fn test_one_shot_failure_hits_next_call_only() {
        let gateway = InMemoryGateway::seeded();
        gateway.fail_once(
            EntityKind::Beds,
            GatewayOp::Update,
            RemoteError::Rejected {
                status: 409,
                detail: "Bed locked".to_string(),
            },
        );
        let patch = Patch::new().set("status", "Cleaning");

        let first = gateway.update(EntityKind::Beds, &id("B-3"), &patch).await;
        let second = gateway.update(EntityKind::Beds, &id("B-3"), &patch).await;

        assert_eq!(first.unwrap_err().status(), Some(409));
        assert_eq!(second.unwrap()["status"], "Cleaning");
    }

    #[tokio::test]
    async fn test_hold_parks_calls() {
        let gateway = Arc::new(InMemoryGateway::seeded());
        gateway.hold();

        let pending = tokio::spawn({
            let gateway = gateway.clone();
            async move { gateway.list(EntityKind::Staff).await }
        });

        while gateway.in_flight() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(!pending.is_finished());

        gateway.release();
        let staff = pending.await.unwrap().unwrap();
        assert_eq!(staff.len(), 6);
        assert_eq!(gateway.in_flight(), 0);
    }
}
