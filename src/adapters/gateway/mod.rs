//! Remote gateway adapters
//!
//! The synchronizer only sees [`RemoteGateway`]. Two implementations exist:
//!
//! - [`HttpGateway`] - the console's REST API over `reqwest`
//! - [`InMemoryGateway`] - seeded in-process authority for demo mode and tests
//!
//! [`create_gateway`] picks one from [`GatewayConfig`](crate::config::GatewayConfig).

pub mod factory;
pub mod http;
pub mod memory;
pub mod seed;
pub mod traits;

pub use factory::create_gateway;
pub use http::HttpGateway;
pub use memory::{GatewayCall, InMemoryGateway};
pub use traits::{DeleteAck, GatewayOp, GatewayResult, RemoteGateway};
