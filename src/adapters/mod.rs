//! External system integrations for Nexus.
//!
//! - [`gateway`] - the remote authority every collection mirrors (HTTP or
//!   in-memory demo)
//! - [`assistant`] - `/ai/*` collaborator for derived features
//!
//! # Design Pattern
//!
//! Adapters sit behind traits so the synchronizer can be driven by the
//! in-memory gateway in tests and demo mode:
//!
//! ```rust,no_run
//! use nexus::adapters::gateway::{create_gateway, RemoteGateway};
//! use nexus::config::{GatewayConfig, GatewayMode};
//! use nexus::domain::EntityKind;
//!
//! # async fn example() -> nexus::domain::Result<()> {
//! let config = GatewayConfig {
//!     mode: GatewayMode::Demo,
//!     ..GatewayConfig::default()
//! };
//! let gateway = create_gateway(&config)?;
//! let beds = gateway.list(EntityKind::Beds).await?;
//! println!("{} beds via {}", beds.len(), gateway.describe());
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod gateway;
