//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "nexus.toml")]
    pub output: String,

    /// Include comments for every option
    #[arg(long)]
    pub with_examples: bool,

    /// Start in demo mode (seeded in-memory gateway)
    #[arg(long)]
    pub demo: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Nexus configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let mode = if self.demo { "demo" } else { "remote" };
        let config_content = if self.with_examples {
            Self::generate_config_with_examples(mode)
        } else {
            Self::generate_minimal_config(mode)
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                if !self.demo {
                    println!("  2. Set NEXUS_API_TOKEN in your environment or .env file");
                }
                println!("  3. Validate configuration: nexus validate-config");
                println!("  4. Check the connection: nexus status");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    fn generate_minimal_config(mode: &str) -> String {
        format!(
            r#"# Nexus Configuration File

[application]
log_level = "info"

[gateway]
mode = "{mode}"
base_url = "http://localhost:5000/api"
# token = "${{NEXUS_API_TOKEN}}"
timeout_seconds = 30
tls_verify = true

[sync]
failure_policy = "rollback"
push_aggregates = false

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        )
    }

    fn generate_config_with_examples(mode: &str) -> String {
        format!(
            r#"# Nexus Configuration File
#
# Every section except [gateway] may be omitted. Values of the form
# ${{VAR}} are read from the environment, and NEXUS_<SECTION>_<KEY>
# variables override any setting (e.g. NEXUS_GATEWAY_BASE_URL).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Remote Authority
# ============================================================================
[gateway]
# "remote" talks to the console API, "demo" serves seeded in-memory data
mode = "{mode}"

# API base URL; collection paths such as /patients are appended to it
base_url = "http://localhost:5000/api"

# Optional bearer token (use an environment variable)
# token = "${{NEXUS_API_TOKEN}}"

# Per-request timeout in seconds (1-300)
timeout_seconds = 30

# TLS certificate verification
tls_verify = true

# Simulated latency for demo mode, in milliseconds
demo_latency_ms = 0

# ============================================================================
# Synchronization
# ============================================================================
[sync]
# What happens to an optimistic change the remote authority refuses:
# - rollback: undo it (remove the new row, restore the previous record)
# - keep_and_mark: keep it and flag the row as failed for retry or discard
failure_policy = "rollback"

# Also send blood inventory aggregate changes to the remote authority
push_aggregates = false

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Write JSON logs to files in addition to the console
local_enabled = false

# Directory for log files
local_path = "./logs"

# Rotation (daily or hourly)
local_rotation = "daily"
"#
        )
    }
}
