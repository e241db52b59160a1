//! Validate config command implementation

use crate::config::{load_config, GatewayMode};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates; a successful load prints the summary.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Gateway Mode: {}", config.gateway.mode);
        match config.gateway.mode {
            GatewayMode::Remote => {
                println!("  API Base URL: {}", config.gateway.base_url);
                println!(
                    "  Bearer Token: {}",
                    if config.gateway.token.is_some() { "set" } else { "not set" }
                );
                println!("  Timeout: {}s", config.gateway.timeout_seconds);
                println!("  TLS Verify: {}", config.gateway.tls_verify);
            }
            GatewayMode::Demo => {
                println!("  Demo Latency: {}ms", config.gateway.demo_latency_ms);
            }
        }
        println!("  Failure Policy: {}", config.sync.failure_policy);
        println!("  Push Aggregates: {}", config.sync.push_aggregates);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}
