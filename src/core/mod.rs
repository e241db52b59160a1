//! Core synchronization logic for Nexus.
//!
//! # Modules
//!
//! - [`store`] - Entity Store: one ordered, id-unique collection per kind
//! - [`mutator`] - CRUD Mutator: optimistic create/update, confirmed delete,
//!   reconciliation and failure policy
//! - [`aggregate`] - Derived Aggregate Maintainer for blood inventory
//! - [`facade`] - Synchronizer Facade consumed by UI surfaces
//!
//! # Mutation flow
//!
//! 1. **Stage**: the mutator writes the optimistic change to the store
//!    (deletes only mark the row)
//! 2. **Call**: the remote gateway is awaited; other operations may run and
//!    observe the staged state
//! 3. **Settle**: on success the canonical record replaces the staged one
//!    unless a newer local write exists; on failure the failure policy
//!    decides between rollback and keep-and-mark
//! 4. **Maintain**: the confirmed transition is reduced to an aggregate delta
//!    and applied to the blood unit rows

pub mod aggregate;
pub mod facade;
pub mod mutator;
pub mod store;
