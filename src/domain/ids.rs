//! Entity identifier type with validation
//!
//! Identifiers are either assigned by the caller before the remote authority
//! has confirmed a record, or minted by the remote authority itself.

use super::kind::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Entity identifier newtype wrapper
///
/// Unique within one collection. The wire form is a plain string.
///
/// # Examples
///
/// ```
/// use nexus::domain::ids::EntityId;
/// use std::str::FromStr;
///
/// let id = EntityId::from_str("P-101").unwrap();
/// assert_eq!(id.as_str(), "P-101");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Creates a new EntityId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(EntityId)` if the ID is non-blank, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Entity ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Mints a locally-assigned identifier for a record not yet confirmed
    /// by the remote authority, using the kind's id prefix.
    pub fn generate(kind: EntityKind) -> Self {
        let suffix = Uuid::new_v4().simple().to_string().to_uppercase();
        let prefix = kind.id_prefix();
        if prefix.is_empty() {
            Self(format!("LOCAL-{suffix}"))
        } else {
            Self(format!("{prefix}{suffix}"))
        }
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
