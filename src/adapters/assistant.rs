//! Assistant collaborator
//!
//! Derived features (triage suggestions, note analysis, discharge summaries,
//! free-form prompts) are served by the API's `/ai/*` routes. They are
//! independent of the synchronizer: nothing in `core` calls this module.
//!
//! Requests carry no client-side timeout and are never retried; generation
//! can legitimately take a long time.

use crate::adapters::gateway::http::{status_error, transport_error};
use crate::config::{GatewayConfig, SecretString};
use crate::domain::{NexusError, RemoteError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use url::Url;

/// One assistant call
#[derive(Debug, Clone, PartialEq)]
pub enum AssistRequest {
    /// Triage suggestion for a patient presentation
    Triage(Value),
    AnalyzeNotes { notes: String },
    DischargeSummary(Value),
    Generic {
        prompt: String,
        context: Option<Value>,
    },
}

impl AssistRequest {
    /// Route below the API base
    pub fn path(&self) -> &'static str {
        match self {
            AssistRequest::Triage(_) => "ai/triage",
            AssistRequest::AnalyzeNotes { .. } => "ai/analyze-notes",
            AssistRequest::DischargeSummary(_) => "ai/discharge-summary",
            AssistRequest::Generic { .. } => "ai/generic",
        }
    }

    pub fn body(&self) -> Value {
        match self {
            AssistRequest::Triage(data) | AssistRequest::DischargeSummary(data) => data.clone(),
            AssistRequest::AnalyzeNotes { notes } => json!({ "notes": notes }),
            AssistRequest::Generic { prompt, context } => {
                json!({ "prompt": prompt, "context": context })
            }
        }
    }
}

/// Executes assistant requests
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Runs one request and returns the response document untouched
    ///
    /// # Errors
    ///
    /// Returns `NexusError::Remote` if the call fails or is rejected.
    async fn execute(&self, request: AssistRequest) -> Result<Value>;
}

/// Assistant over the console API
pub struct HttpAssistant {
    base_url: Url,
    client: Client,
    token: Option<SecretString>,
}

impl HttpAssistant {
    /// Builds the assistant client, sharing the gateway's base URL,
    /// credential and TLS settings
    ///
    /// # Errors
    ///
    /// Returns `NexusError::Configuration` if the base URL is unusable or the
    /// HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let mut raw = config.base_url.trim_end_matches('/').to_string();
        raw.push('/');
        let base_url = Url::parse(&raw).map_err(|e| {
            NexusError::Configuration(format!("Invalid gateway.base_url '{}': {}", config.base_url, e))
        })?;

        let mut client_builder = ClientBuilder::new();
        if !config.tls_verify {
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
}

#[async_trait]
impl Assistant for HttpAssistant {
    async fn execute(&self, request: AssistRequest) -> Result<Value> {
        let url = self.base_url.join(request.path()).map_err(|e| {
            NexusError::Configuration(format!("Invalid assistant route {}: {}", request.path(), e))
        })?;
        tracing::debug!(route = request.path(), "Assistant request");

        let mut builder = self.client.post(url).json(&request.body());
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.expose_secret().as_ref());
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body).into());
        }

        response.json::<Value>().await.map_err(|e| {
            NexusError::Remote(RemoteError::ConnectionFailed(format!(
                "Unreadable assistant response: {e}"
            )))
        })
    }
}
