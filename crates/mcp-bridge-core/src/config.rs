//! Centralized configuration for the bridge.
//!
//! Protocol constants shared by the transport and the error translator, plus
//! the validated runtime configuration built once at startup.

use crate::{BridgeError, Result};
use url::Url;

/// Wire-level protocol constants.
pub struct ProtocolConfig;

impl ProtocolConfig {
    pub const JSONRPC_VERSION: &'static str = "2.0";
    pub const SESSION_ID_HEADER: &'static str = "mcp-session-id";
    pub const CONTENT_TYPE: &'static str = "application/json";
    pub const ACCEPT: &'static str = "application/json, text/event-stream";
    pub const EVENT_STREAM_MEDIA_TYPE: &'static str = "text/event-stream";
    /// Application-defined JSON-RPC code for every bridge-level failure.
    pub const BRIDGE_ERROR_CODE: i32 = -32000;
}

/// Runtime configuration for one bridge instance.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    endpoint: Url,
}

impl BridgeConfig {
    /// Validate the upstream endpoint.
    ///
    /// The endpoint must be an absolute `http` or `https` URL.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint.trim()).map_err(|e| BridgeError::Config {
            message: format!("Invalid upstream URL '{}': {}", endpoint, e),
        })?;

        match endpoint.scheme() {
            "http" | "https" => {}
            other => {
                return Err(BridgeError::Config {
                    message: format!("Unsupported URL scheme '{}': expected http or https", other),
                });
            }
        }

        if endpoint.host_str().is_none() {
            return Err(BridgeError::Config {
                message: format!("Upstream URL '{}' has no host", endpoint),
            });
        }

        Ok(Self { endpoint })
    }

    /// The upstream endpoint every request is POSTed to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}
