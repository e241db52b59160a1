//! The `Entity` trait shared by every record type
//!
//! Records cross the remote gateway as JSON. [`decode`] is the single place a
//! payload becomes a typed record, so nothing untyped reaches the store.

use super::errors::RemoteError;
use super::ids::EntityId;
use super::kind::EntityKind;
use super::records::BloodGroup;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

/// A typed record mirrored from the remote authority
pub trait Entity: Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync + 'static {
    /// The collection this record type belongs to
    const KIND: EntityKind;

    /// Identifier, unique within the collection
    fn id(&self) -> &EntityId;

    /// Replaces the identifier (used when the remote authority re-keys a record)
    fn set_id(&mut self, id: EntityId);

    /// Re-derives computed fields after ingest or patch
    fn normalize(&mut self) {}

    /// The inventory category this record currently counts towards, if any.
    ///
    /// Only unit-level stock records return `Some`, and only while they are
    /// in an active (non-terminal) state.
    fn inventory_key(&self) -> Option<BloodGroup> {
        None
    }
}

/// Parses a remote payload into a typed record and normalizes it
///
/// # Errors
///
/// Returns [`RemoteError::InvalidPayload`] when the payload does not match the
/// record schema.
pub fn decode<T: Entity>(value: Value) -> Result<T, RemoteError> {
    let mut record: T = serde_json::from_value(value).map_err(|e| RemoteError::InvalidPayload {
        kind: T::KIND,
        detail: e.to_string(),
    })?;
    record.normalize();
    Ok(record)
}

/// Parses a list payload, failing on the first record that does not match
pub fn decode_all<T: Entity>(values: Vec<Value>) -> Result<Vec<T>, RemoteError> {
    values.into_iter().map(decode::<T>).collect()
}

/// Serializes a record into the JSON sent to the remote authority
pub fn encode<T: Entity>(record: &T) -> Result<Value, RemoteError> {
    serde_json::to_value(record).map_err(|e| RemoteError::InvalidPayload {
        kind: T::KIND,
        detail: e.to_string(),
    })
}
