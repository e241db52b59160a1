//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::NexusConfig;
use super::secret::secret_string;
use crate::domain::errors::NexusError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into NexusConfig
/// 4. Applies environment variable overrides (NEXUS_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `NexusError::Configuration` if:
/// - File cannot be read
/// - A referenced environment variable is not set
/// - TOML parsing fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use nexus::config::load_config;
///
/// # fn example() -> nexus::domain::Result<()> {
/// let config = load_config("nexus.toml")?;
/// println!("Gateway: {}", config.gateway.base_url);
/// # Ok(())
/// # }
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<NexusConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(NexusError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        NexusError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and
/// validation exactly as [`load_config`] does
///
/// # Errors
///
/// See [`load_config`].
pub fn parse_config(contents: &str) -> Result<NexusConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: NexusConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        NexusError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched. Every missing variable is reported in
/// a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| NexusError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(NexusError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the NEXUS_* prefix
///
/// Environment variables follow the pattern `NEXUS_<SECTION>_<KEY>`, for
/// example `NEXUS_GATEWAY_BASE_URL` or `NEXUS_SYNC_FAILURE_POLICY`.
///
/// # Errors
///
/// Returns an error if an enumerated override holds an unknown value.
fn apply_env_overrides(config: &mut NexusConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("NEXUS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Gateway overrides
    if let Ok(val) = std::env::var("NEXUS_GATEWAY_MODE") {
        config.gateway.mode = val.parse().map_err(NexusError::Configuration)?;
    }
    if let Ok(val) = std::env::var("NEXUS_GATEWAY_BASE_URL") {
        config.gateway.base_url = val;
    }
    if let Ok(val) = std::env::var("NEXUS_GATEWAY_TOKEN") {
        config.gateway.token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("NEXUS_GATEWAY_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.gateway.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("NEXUS_GATEWAY_TLS_VERIFY") {
        config.gateway.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("NEXUS_GATEWAY_DEMO_LATENCY_MS") {
        if let Ok(latency) = val.parse() {
            config.gateway.demo_latency_ms = latency;
        }
    }

    // Sync overrides
    if let Ok(val) = std::env::var("NEXUS_SYNC_FAILURE_POLICY") {
        config.sync.failure_policy = val.parse().map_err(NexusError::Configuration)?;
    }
    if let Ok(val) = std::env::var("NEXUS_SYNC_PUSH_AGGREGATES") {
        config.sync.push_aggregates = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("NEXUS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("NEXUS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("NEXUS_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("NEXUS_LOADER_TEST_VAR", "test_value");
        let input = "token = \"${NEXUS_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "token = \"test_value\"\n");
        std::env::remove_var("NEXUS_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_reports_all_missing() {
        std::env::remove_var("NEXUS_LOADER_MISSING_A");
        std::env::remove_var("NEXUS_LOADER_MISSING_B");
        let input = "a = \"${NEXUS_LOADER_MISSING_A}\"\nb = \"${NEXUS_LOADER_MISSING_B}\"";
        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("NEXUS_LOADER_MISSING_A"));
        assert!(err.contains("NEXUS_LOADER_MISSING_B"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("NEXUS_LOADER_COMMENTED");
        let input = "# token = \"${NEXUS_LOADER_COMMENTED}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-nexus.toml");
        assert!(matches!(result, Err(NexusError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[gateway]
mode = "remote"
base_url = "https://console.example.org/api"
timeout_seconds = 10

[sync]
failure_policy = "rollback"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.gateway.base_url, "https://console.example.org/api");
        assert_eq!(config.gateway.timeout_seconds, 10);
    }

    #[test]
    fn test_parse_config_invalid_toml() {
        let result = parse_config("[gateway\nbase_url = 1");
        assert!(matches!(result, Err(NexusError::Configuration(_))));
    }
}
