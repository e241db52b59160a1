//! Gateway factory
//!
//! Selects the remote gateway implementation from configuration.

use super::http::HttpGateway;
use super::memory::InMemoryGateway;
use super::traits::RemoteGateway;
use crate::config::schema::{GatewayConfig, GatewayMode};
use crate::domain::Result;
use std::sync::Arc;
use std::time::Duration;

/// Create a remote gateway based on the configuration
///
/// `demo` mode yields an [`InMemoryGateway`] seeded with fixture data that
/// mints ids on create, like the real authority does. `remote` mode yields
/// an [`HttpGateway`].
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created
pub fn create_gateway(config: &GatewayConfig) -> Result<Arc<dyn RemoteGateway>> {
    match config.mode {
        GatewayMode::Demo => {
            tracing::info!(latency_ms = config.demo_latency_ms, "Creating demo gateway");
            let gateway = InMemoryGateway::seeded()
                .with_server_ids()
                .with_latency(Duration::from_millis(config.demo_latency_ms));
            Ok(Arc::new(gateway) as Arc<dyn RemoteGateway>)
        }
        GatewayMode::Remote => {
            tracing::info!(base_url = %config.base_url, "Creating HTTP gateway");
            let gateway = HttpGateway::new(config)?;
            Ok(Arc::new(gateway) as Arc<dyn RemoteGateway>)
        }
    }
}
