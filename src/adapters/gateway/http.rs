//! HTTP remote gateway
//!
//! Talks to the console API: `GET {base}/{endpoint}` lists a collection,
//! `POST` creates, `PUT {base}/{endpoint}/{id}` applies a partial update and
//! `DELETE` removes. Error responses carry `{"detail": "..."}` bodies.
//!
//! No retries are attempted here; a failed call settles the pending mutation.

use super::traits::{DeleteAck, GatewayResult, RemoteGateway};
use crate::config::{GatewayConfig, SecretString};
use crate::domain::{EntityId, EntityKind, NexusError, Patch, RemoteError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Error body shape returned by the remote authority
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Gateway over the console's REST API
///
/// # Example
///
/// ```no_run
/// use nexus::adapters::gateway::{HttpGateway, RemoteGateway};
/// use nexus::config::GatewayConfig;
/// use nexus::domain::EntityKind;
///
/// # async fn example() -> nexus::domain::Result<()> {
/// let gateway = HttpGateway::new(&GatewayConfig::default())?;
/// let patients = gateway.list(EntityKind::Patients).await?;
/// println!("{} patients", patients.len());
/// # Ok(())
/// # }
/// ```
pub struct HttpGateway {
    base_url: Url,
    client: Client,
    token: Option<SecretString>,
}

impl HttpGateway {
    /// Builds the HTTP client from gateway configuration
    ///
    /// # Errors
    ///
    /// Returns `NexusError::Configuration` if the base URL cannot carry
    /// collection paths or the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            NexusError::Configuration(format!("Invalid gateway.base_url '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(NexusError::Configuration(format!(
                "gateway.base_url '{}' cannot be used as an API base",
                config.base_url
            )));
        }

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification disabled for the remote gateway");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            NexusError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url,
            client,
            token: config.token.clone(),
        })
    }

    /// Collection URL, or record URL when `id` is given
    fn url_for(&self, kind: EntityKind, id: Option<&EntityId>) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                RemoteError::ConnectionFailed(format!("Invalid base URL: {}", self.base_url))
            })?;
            segments
                .pop_if_empty()
                .push(kind.endpoint().trim_start_matches('/'));
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret().as_ref()),
            None => builder,
        }
    }

    /// Sends a request and maps transport failures and non-success statuses
    async fn send(&self, builder: RequestBuilder) -> GatewayResult<Response> {
        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }

    async fn json_body(kind: EntityKind, response: Response) -> GatewayResult<Value> {
        response.json::<Value>().await.map_err(|e| RemoteError::InvalidPayload {
            kind,
            detail: e.to_string(),
        })
    }
}

pub(crate) fn transport_error(error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Timeout(error.to_string())
    } else {
        RemoteError::ConnectionFailed(error.to_string())
    }
}

/// Maps an error status and body to a `RemoteError` carrying the server's
/// detail, or the status text when the body has none
pub(crate) fn status_error(status: StatusCode, body: &str) -> RemoteError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| match parsed.detail {
            Some(Value::String(detail)) => Some(detail),
            Some(other) => Some(other.to_string()),
            None => parsed.error,
        })
        .filter(|detail| !detail.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("API Error: {}", status.as_u16()))
        });

    if status.is_server_error() {
        RemoteError::ServerError {
            status: status.as_u16(),
            detail,
        }
    } else {
        RemoteError::Rejected {
            status: status.as_u16(),
            detail,
        }
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn list(&self, kind: EntityKind) -> GatewayResult<Vec<Value>> {
        let url = self.url_for(kind, None)?;
        tracing::debug!(kind = %kind, url = %url, "GET collection");

        let response = self.send(self.request(Method::GET, url)).await?;
        match Self::json_body(kind, response).await? {
            Value::Array(items) => Ok(items),
            other => Err(RemoteError::InvalidPayload {
                kind,
                detail: format!("expected a JSON array, got {}", json_type(&other)),
            }),
        }
    }

    async fn get(&self, kind: EntityKind, id: &EntityId) -> GatewayResult<Value> {
        let url = self.url_for(kind, Some(id))?;
        let response = self.send(self.request(Method::GET, url)).await?;
        Self::json_body(kind, response).await
    }

    async fn create(&self, kind: EntityKind, record: Value) -> GatewayResult<Value> {
        let url = self.url_for(kind, None)?;
        tracing::debug!(kind = %kind, url = %url, "POST record");

        let response = self
            .send(self.request(Method::POST, url).json(&record))
            .await?;
        Self::json_body(kind, response).await
    }

    async fn update(&self, kind: EntityKind, id: &EntityId, patch: &Patch) -> GatewayResult<Value> {
        let url = self.url_for(kind, Some(id))?;
        tracing::debug!(kind = %kind, id = %id, fields = patch.len(), "PUT patch");

        let response = self.send(self.request(Method::PUT, url).json(patch)).await?;
        Self::json_body(kind, response).await
    }

    async fn delete(&self, kind: EntityKind, id: &EntityId) -> GatewayResult<DeleteAck> {
        let url = self.url_for(kind, Some(id))?;
        tracing::debug!(kind = %kind, id = %id, "DELETE record");

        let response = self.send(self.request(Method::DELETE, url)).await?;
        let body = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str::<DeleteAck>(&body).unwrap_or_else(|_| DeleteAck::new("Deleted")))
    }

    fn describe(&self) -> String {
        format!("remote {}", self.base_url)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
