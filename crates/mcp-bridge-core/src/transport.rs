//! HTTP transport to the upstream JSON-RPC endpoint.
//!
//! One call to [`Transport::send`] is exactly one POST. There are no retries
//! and no client-side timeout: a hung upstream stalls the caller.

use crate::config::{BridgeConfig, ProtocolConfig};
use crate::session::SessionTracker;
use crate::sse::ResponseFormat;
use crate::{BridgeError, Result};
use reqwest::{header, Client};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Raw upstream reply, before body decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    /// Decode path selected by the declared content type.
    pub fn format(&self) -> ResponseFormat {
        ResponseFormat::from_content_type(self.content_type.as_deref())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request envelope upstream.
///
/// Implementations read the tracked session id before sending and adopt any
/// session id the upstream returns.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, session: &mut SessionTracker, request: &Value) -> Result<RawResponse>;
}

/// `reqwest`-backed transport POSTing to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport for the configured endpoint.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        let client = Client::builder().build().map_err(|e| BridgeError::Network {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(e),
        })?;

        Ok(Self::with_client(client, config))
    }

    /// Create a transport around an existing client.
    pub fn with_client(client: Client, config: &BridgeConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint().clone(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, session: &mut SessionTracker, request: &Value) -> Result<RawResponse> {
        let body = serde_json::to_vec(request).map_err(BridgeError::invalid_request)?;

        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, ProtocolConfig::CONTENT_TYPE)
            .header(header::ACCEPT, ProtocolConfig::ACCEPT);
        if let Some(session_id) = session.current() {
            builder = builder.header(ProtocolConfig::SESSION_ID_HEADER, session_id);
        }

        let response = builder
            .body(body)
            .send()
            .await
            .map_err(|e| BridgeError::Network {
                message: format!("POST {} failed: {}", self.endpoint, e),
                source: Some(e),
            })?;

        // The upstream is authoritative: any session id it returns replaces ours.
        if let Some(session_id) = response
            .headers()
            .get(ProtocolConfig::SESSION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            session.adopt(session_id);
        }

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| BridgeError::Network {
            message: format!("Failed to read response body from {}: {}", self.endpoint, e),
            source: Some(e),
        })?;

        debug!(
            "POST {} -> {} ({}, {} bytes)",
            self.endpoint,
            status,
            content_type.as_deref().unwrap_or("no content-type"),
            body.len()
        );

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
