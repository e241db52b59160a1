//! Configuration management for Nexus.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Nexus uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `NEXUS_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nexus::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("nexus.toml")?;
//!
//! println!("Gateway: {} ({})", config.gateway.base_url, config.gateway.mode);
//! println!("Failure policy: {}", config.sync.failure_policy);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`GatewayConfig`] - Remote authority connection and demo mode
//! - [`SyncConfig`] - Failure policy and aggregate push
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [gateway]
//! mode = "remote"
//! base_url = "http://localhost:5000/api"
//! token = "${NEXUS_API_TOKEN}"
//! timeout_seconds = 30
//!
//! [sync]
//! failure_policy = "rollback"
//! push_aggregates = false
//!
//! [logging]
//! local_enabled = false
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, GatewayConfig, GatewayMode, LoggingConfig, NexusConfig, SyncConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
