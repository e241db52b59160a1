//! Domain models and types for Nexus.
//!
//! This module contains the record schemas, identifiers, and error types shared
//! by the store, the mutator, and the gateway adapters.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers and kinds** ([`EntityId`], [`EntityKind`])
//! - **Typed records** ([`records`]), one schema per entity kind, behind the [`Entity`] trait
//! - **Partial updates** ([`Patch`])
//! - **Error types** ([`NexusError`], [`RemoteError`])
//! - **Result type alias** ([`Result`])
//!
//! # Parsing at the boundary
//!
//! Payloads from the remote authority are parsed into typed records before they
//! reach the store:
//!
//! ```rust
//! use nexus::domain::{decode, records::BloodUnit, records::StockTier};
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let unit: BloodUnit = decode(json!({
//!     "id": "BU-006",
//!     "group": "O-",
//!     "bags": 4,
//!     "status": "Adequate"
//! }))?;
//!
//! // Derived status is recomputed, never trusted from the wire
//! assert_eq!(unit.status, StockTier::Low);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod errors;
pub mod ids;
pub mod kind;
pub mod patch;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use entity::{decode, decode_all, encode, Entity};
pub use errors::{NexusError, RemoteError};
pub use ids::EntityId;
pub use kind::EntityKind;
pub use patch::Patch;
pub use result::Result;
