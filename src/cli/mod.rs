//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Nexus using clap.

pub mod commands;

use crate::config::{load_config, LoggingConfig};
use clap::{Parser, Subcommand};

/// Nexus - facility operations console synchronizer
#[derive(Parser, Debug)]
#[command(name = "nexus")]
#[command(version, about, long_about = None)]
#[command(author = "Nexus Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "nexus.toml", env = "NEXUS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "NEXUS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level and logging section for this run
    ///
    /// Commands that read the configuration file log as its `[logging]`
    /// section says. `init`, or a file that does not load, gets console
    /// output only; the command itself reports the load error. `--log-level`
    /// wins over `application.log_level`.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        let loaded = match self.command {
            Commands::Init(_) => None,
            _ => load_config(&self.config).ok(),
        };
        let (level, logging) = match loaded {
            Some(config) => (config.application.log_level, config.logging),
            None => (
                "info".to_string(),
                LoggingConfig {
                    local_enabled: false,
                    ..LoggingConfig::default()
                },
            ),
        };
        (self.log_level.clone().unwrap_or(level), logging)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Refresh every collection and show counts and dashboard figures
    Status(commands::status::StatusArgs),

    /// Show blood inventory aggregates and their drift
    Inventory(commands::inventory::InventoryArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["nexus", "status"]);
        assert_eq!(cli.config, "nexus.toml");
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["nexus", "--config", "custom.toml", "status"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["nexus", "--log-level", "debug", "status"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["nexus", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["nexus", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_inventory_audit() {
        let cli = Cli::parse_from(["nexus", "inventory", "--audit"]);
        match cli.command {
            Commands::Inventory(args) => assert!(args.audit),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_logging_settings_follow_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = config_file(&format!(
            "[application]\nlog_level = \"debug\"\n\n[gateway]\nmode = \"demo\"\n\n[logging]\nlocal_enabled = true\nlocal_path = \"{}\"\nlocal_rotation = \"hourly\"\n",
            dir.path().display()
        ));
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["nexus", "--config", path, "status"]);
        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "debug");
        assert!(logging.local_enabled);
        assert_eq!(logging.local_rotation, "hourly");

        let cli = Cli::parse_from(["nexus", "--config", path, "--log-level", "warn", "inventory"]);
        assert_eq!(cli.logging_settings().0, "warn");
    }

    #[test]
    fn test_logging_settings_fall_back_to_console() {
        let cli = Cli::parse_from(["nexus", "--config", "does-not-exist.toml", "status"]);
        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "info");
        assert!(!logging.local_enabled);

        let cli = Cli::parse_from(["nexus", "init"]);
        assert!(!cli.logging_settings().1.local_enabled);
    }
}
