//! Partial updates
//!
//! A [`Patch`] is a set of top-level fields to overwrite on a record. Applying
//! it is a shallow merge: every field named in the patch replaces the field of
//! the same name, nested values are replaced wholesale, and the merged result
//! is re-parsed against the record schema so a patch can never leave a record
//! in a shape its type does not allow.

use super::entity::Entity;
use super::errors::NexusError;
use super::result::Result;
use serde::Serialize;
use serde_json::{Map, Value};

/// Field name that identifies a record; patches may not change it
pub const ID_FIELD: &str = "id";

/// Shallow partial update of one record
///
/// # Examples
///
/// ```
/// use nexus::domain::Patch;
///
/// let patch = Patch::new().set("status", "Cancelled");
/// assert!(patch.contains("status"));
/// assert_eq!(patch.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Patch(Map<String, Value>);

impl Patch {
    /// Creates an empty patch
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Sets a field to a JSON value
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Sets a field to the serialized form of any serializable value
    /// (typically one of the record status enums)
    pub fn set_serialized<V: Serialize>(mut self, field: impl Into<String>, value: &V) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        self.0.insert(field.into(), value);
        Ok(self)
    }

    /// Builds a patch from a JSON object
    ///
    /// # Errors
    ///
    /// Returns a validation error when `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(NexusError::Validation(format!(
                "Patch must be a JSON object, got {other}"
            ))),
        }
    }

    /// Whether the patch names the given field
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Value the patch assigns to a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Number of fields in the patch
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in the patch
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// JSON object form, as sent to the remote authority
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Shallow-merges this patch onto `record` and returns the merged record
    ///
    /// # Errors
    ///
    /// Returns a validation error if the patch tries to change the record id
    /// or if the merged fields do not satisfy the record schema.
    pub fn apply<T: Entity>(&self, record: &T) -> Result<T> {
        if let Some(new_id) = self.0.get(ID_FIELD) {
            if new_id.as_str() != Some(record.id().as_str()) {
                return Err(NexusError::Validation(format!(
                    "Patch cannot change the id of {} {}",
                    T::KIND,
                    record.id()
                )));
            }
        }

        let mut merged = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            other => {
                return Err(NexusError::Serialization(format!(
                    "{} record did not serialize to an object: {other}",
                    T::KIND
                )))
            }
        };

        for (field, value) in &self.0 {
            merged.insert(field.clone(), value.clone());
        }

        let mut patched: T = serde_json::from_value(Value::Object(merged)).map_err(|e| {
            NexusError::Validation(format!("Invalid patch for {} {}: {e}", T::KIND, record.id()))
        })?;
        patched.normalize();
        Ok(patched)
    }
}

impl From<Map<String, Value>> for Patch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
