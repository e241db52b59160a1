//! CLI command implementations
//!
//! Exit codes: 0 success, 2 configuration error, 4 connection error,
//! 5 fatal error.

pub mod init;
pub mod inventory;
pub mod status;
pub mod validate;

use crate::config::{load_config, NexusConfig};
use crate::core::facade::Synchronizer;

/// Loads configuration and builds the synchronizer, printing the failure
/// and returning the exit code when either step fails
pub(crate) fn connect(config_path: &str) -> Result<(NexusConfig, Synchronizer), i32> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            return Err(2);
        }
    };

    match Synchronizer::from_config(&config) {
        Ok(sync) => Ok((config, sync)),
        Err(e) => {
            println!("❌ Failed to create gateway");
            println!("   Error: {e}");
            Err(2)
        }
    }
}
