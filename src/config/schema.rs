//! Configuration schema types
//!
//! This module defines the configuration structure for Nexus. Every section
//! except `[gateway]` may be omitted and falls back to its defaults.

use crate::config::SecretString;
use crate::core::mutator::FailurePolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which gateway implementation backs the synchronizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    /// HTTP remote authority
    #[default]
    Remote,
    /// In-memory authority seeded with fixture data
    Demo,
}

impl fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayMode::Remote => f.write_str("remote"),
            GatewayMode::Demo => f.write_str("demo"),
        }
    }
}

impl FromStr for GatewayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Ok(GatewayMode::Remote),
            "demo" | "mock" => Ok(GatewayMode::Demo),
            other => Err(format!("Invalid gateway mode '{other}'. Must be one of: remote, demo")),
        }
    }
}

/// Main Nexus configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NexusConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Remote authority connection
    pub gateway: GatewayConfig,

    /// Mutation and aggregate behaviour
    #[serde(default)]
    pub sync: SyncConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl NexusConfig {
    /// Validates the entire configuration
    ///
    /// # Errors
    ///
    /// Returns the first section error found, as a human-readable message.
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.gateway.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Remote authority connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// `remote` (HTTP) or `demo` (in-memory)
    #[serde(default)]
    pub mode: GatewayMode,

    /// API base URL, e.g. `http://localhost:5000/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional bearer credential
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub token: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Verify TLS certificates
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Simulated latency of the demo gateway
    #[serde(default)]
    pub demo_latency_ms: u64,
}

impl GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err("gateway.timeout_seconds must be between 1 and 300".to_string());
        }

        if self.mode == GatewayMode::Demo {
            return Ok(());
        }

        if self.base_url.trim().is_empty() {
            return Err("gateway.base_url cannot be empty".to_string());
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("gateway.base_url '{}' is not a valid URL: {}", self.base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err("gateway.base_url must start with http:// or https://".to_string());
        }

        if let Some(token) = &self.token {
            if token.expose_secret().is_empty() {
                return Err("gateway.token cannot be blank when set".to_string());
            }
        }

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            mode: GatewayMode::default(),
            base_url: default_base_url(),
            token: None,
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
            demo_latency_ms: 0,
        }
    }
}

/// Mutation and aggregate behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// What happens to an optimistic row when the remote call fails
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Also send aggregate changes to the remote authority
    #[serde(default)]
    pub push_aggregates: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn remote_config() -> GatewayConfig {
        GatewayConfig {
            base_url: "https://console.example.org/api".to_string(),
            ..GatewayConfig::default()
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gateway_config_validation() {
        let mut config = remote_config();
        assert!(config.validate().is_ok());

        config.base_url = "ftp://console.example.org".to_string();
        assert!(config.validate().is_err());

        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gateway_timeout_bounds() {
        let mut config = remote_config();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());

        config.timeout_seconds = 301;
        assert!(config.validate().is_err());

        config.timeout_seconds = 300;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_token_rejected() {
        let mut config = remote_config();
        config.token = Some(secret_string("  ".to_string()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_demo_mode_skips_url_checks() {
        let config = GatewayConfig {
            mode: GatewayMode::Demo,
            base_url: String::new(),
            ..GatewayConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: NexusConfig = toml::from_str(
            r#"
[gateway]
base_url = "http://localhost:5000/api"
"#,
        )
        .unwrap();

        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.gateway.mode, GatewayMode::Remote);
        assert_eq!(config.gateway.timeout_seconds, 30);
        assert!(config.gateway.tls_verify);
        assert_eq!(config.sync.failure_policy, FailurePolicy::Rollback);
        assert!(!config.sync.push_aggregates);
        assert!(!config.logging.local_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sync_section_parses_policy() {
        let config: NexusConfig = toml::from_str(
            r#"
[gateway]
mode = "demo"

[sync]
failure_policy = "keep_and_mark"
push_aggregates = true
"#,
        )
        .unwrap();

        assert_eq!(config.gateway.mode, GatewayMode::Demo);
        assert_eq!(config.sync.failure_policy, FailurePolicy::KeepAndMark);
        assert!(config.sync.push_aggregates);
    }

    #[test]
    fn test_gateway_mode_from_str() {
        assert_eq!("Demo".parse::<GatewayMode>().unwrap(), GatewayMode::Demo);
        assert_eq!("remote".parse::<GatewayMode>().unwrap(), GatewayMode::Remote);
        assert!("local".parse::<GatewayMode>().is_err());
    }
}
