// Nexus - Facility Operations Console Synchronizer
// Copyright (c) 2025 Nexus Contributors
// Licensed under the MIT License

//! # Nexus - Facility Operations Console Synchronizer
//!
//! Nexus keeps a client-side mirror of the facility console's domain
//! collections (patients, beds, tasks, blood inventory and more) in step
//! with the remote authority that owns them.
//!
//! ## Overview
//!
//! - **Entity Store**: one ordered, id-unique collection per entity kind
//! - **CRUD Mutator**: optimistic creates and updates, confirmed deletes,
//!   reconciliation with the canonical record, configurable failure policy
//! - **Derived Aggregate Maintainer**: per-group blood unit counts follow
//!   confirmed bag mutations, with the stock tier recomputed on every change
//! - **Synchronizer Facade**: the single surface UI code reads and mutates
//!   through, plus bulk refresh and a loading flag
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Store, mutator, aggregates and facade
//! - [`adapters`] - Remote gateway (HTTP or in-memory demo) and assistant
//! - [`domain`] - Identifiers, entity kinds, typed records and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nexus::config::load_config;
//! use nexus::core::facade::Synchronizer;
//! use nexus::domain::records::{BagStatus, BloodBag, BloodGroup};
//! use nexus::domain::{EntityId, EntityKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("nexus.toml")?;
//!     let sync = Synchronizer::from_config(&config)?;
//!
//!     let report = sync.refresh_all().await;
//!     println!("{} records loaded", report.total_records());
//!
//!     let bag = BloodBag {
//!         id: EntityId::generate(EntityKind::BloodBags),
//!         blood_group: BloodGroup::OPos,
//!         donor_id: None,
//!         donor_name: None,
//!         collection_date: "2024-02-01".to_string(),
//!         expiry_date: "2024-03-14".to_string(),
//!         volume: 450.0,
//!         status: BagStatus::Available,
//!         location: Some("Freezer O-1".to_string()),
//!     };
//!     let confirmed = sync.add(bag).await?;
//!     println!("Stored bag {}", confirmed.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], whose error type
//! [`domain::NexusError`] separates local invariant defects (duplicate or
//! missing ids) from remote failures carrying the authority's detail.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
