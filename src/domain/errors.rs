//! Domain error types
//!
//! This module defines the error hierarchy for Nexus. Local store invariant
//! violations and remote gateway failures are kept apart so callers can tell
//! a defect from an expected runtime condition.
//! All errors are domain-specific and don't expose third-party types.

use super::ids::EntityId;
use super::kind::EntityKind;
use thiserror::Error;

/// Main Nexus error type
///
/// This is the primary error type used throughout the synchronizer.
#[derive(Debug, Error)]
pub enum NexusError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Insert of an identifier already present in the collection
    #[error("Duplicate id in {kind}: {id}")]
    DuplicateId { kind: EntityKind, id: EntityId },

    /// Patch of an identifier absent from the collection
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: EntityId },

    /// Remote gateway failures
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Validation errors (record schema, patch shape)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl NexusError {
    /// Local invariant violations that point at a programming or race defect
    pub fn is_local_defect(&self) -> bool {
        matches!(
            self,
            NexusError::DuplicateId { .. } | NexusError::NotFound { .. }
        )
    }

    /// Failures reported by (or while talking to) the remote authority
    pub fn is_remote(&self) -> bool {
        matches!(self, NexusError::Remote(_))
    }

    /// Human-readable detail suitable for a "not saved" indicator
    pub fn detail(&self) -> String {
        match self {
            NexusError::Remote(remote) => remote.detail(),
            other => other.to_string(),
        }
    }
}

/// Remote gateway errors
///
/// Errors that occur when talking to the remote authority.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RemoteError {
    /// Failed to reach the remote authority
    #[error("Failed to connect to remote: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Request rejected by the remote authority (4xx)
    #[error("Rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// Remote authority failed (5xx)
    #[error("Server error ({status}): {detail}")]
    ServerError { status: u16, detail: String },

    /// Response payload does not match the record schema
    #[error("Invalid {kind} payload: {detail}")]
    InvalidPayload { kind: EntityKind, detail: String },

    /// Remote authority unavailable for this operation
    #[error("Remote unavailable: {0}")]
    Unavailable(String),
}

impl RemoteError {
    /// The detail string carried by this error, without the category prefix
    pub fn detail(&self) -> String {
        match self {
            RemoteError::ConnectionFailed(d)
            | RemoteError::Timeout(d)
            | RemoteError::Unavailable(d) => d.clone(),
            RemoteError::Rejected { detail, .. }
            | RemoteError::ServerError { detail, .. }
            | RemoteError::InvalidPayload { detail, .. } => detail.clone(),
        }
    }

    /// HTTP status, when the remote authority answered
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Rejected { status, .. } | RemoteError::ServerError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for NexusError {
    fn from(err: std::io::Error) -> Self {
        NexusError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for NexusError {
    fn from(err: serde_json::Error) -> Self {
        NexusError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for NexusError {
    fn from(err: toml::de::Error) -> Self {
        NexusError::Configuration(format!("TOML parse error: {err}"))
    }
}
