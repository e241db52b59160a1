//! Remote gateway abstraction
//!
//! This module defines the trait that remote gateway adapters must implement
//! to serve as the authority the synchronizer mirrors.
//!
//! Payloads cross this boundary as JSON. Parsing them into typed records is
//! the caller's job (see [`crate::domain::decode`]), so the trait stays
//! object-safe and one adapter serves every entity kind.

use crate::domain::{EntityId, EntityKind, Patch, RemoteError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Result type for gateway calls
pub type GatewayResult<T> = std::result::Result<T, RemoteError>;

/// Acknowledgement returned by a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub detail: String,
}

impl DeleteAck {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Gateway operation, used for logging and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayOp {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl fmt::Display for GatewayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GatewayOp::List => "list",
            GatewayOp::Get => "get",
            GatewayOp::Create => "create",
            GatewayOp::Update => "update",
            GatewayOp::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Remote authority for every entity collection
///
/// Implementations perform authenticated calls and return the canonical
/// record as confirmed by the authority.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Fetch every record of a collection
    ///
    /// # Errors
    ///
    /// Returns an error if the authority cannot be reached or rejects the call.
    async fn list(&self, kind: EntityKind) -> GatewayResult<Vec<Value>>;

    /// Fetch one record
    ///
    /// # Errors
    ///
    /// Returns `Rejected` with status 404 if the record does not exist.
    async fn get(&self, kind: EntityKind, id: &EntityId) -> GatewayResult<Value>;

    /// Create a record and return the canonical record, whose id may differ
    /// from the one supplied
    ///
    /// # Errors
    ///
    /// Returns an error if the authority rejects the record.
    async fn create(&self, kind: EntityKind, record: Value) -> GatewayResult<Value>;

    /// Apply a partial update and return the canonical record
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or the patch is rejected.
    async fn update(&self, kind: EntityKind, id: &EntityId, patch: &Patch) -> GatewayResult<Value>;

    /// Delete a record
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or cannot be deleted.
    async fn delete(&self, kind: EntityKind, id: &EntityId) -> GatewayResult<DeleteAck>;

    /// Short description for status output (endpoint or mode)
    fn describe(&self) -> String;
}
