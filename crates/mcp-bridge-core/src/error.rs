//! Error types for the bridge.
//!
//! Every failure that can happen while handling one input line maps onto a
//! single JSON-RPC error code so the stdio peer always receives a reply.

use crate::config::ProtocolConfig;
use thiserror::Error;

/// Main error type for the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    // Startup errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Framing errors
    #[error("Invalid JSON-RPC request line: {message}")]
    InvalidRequest {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    // Transport errors
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    // Protocol errors
    #[error("No SSE data payload returned by server.")]
    MissingSseData,

    #[error("Invalid JSON in upstream response: {message}")]
    InvalidResponse {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    // Local stream errors
    #[error("Request worker stopped: {message}")]
    WorkerStopped { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        BridgeError::Network {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl BridgeError {
    /// Wrap a parse failure of an input line.
    pub fn invalid_request(err: serde_json::Error) -> Self {
        BridgeError::InvalidRequest {
            message: err.to_string(),
            source: err,
        }
    }

    /// Wrap a parse failure of an upstream payload.
    pub fn invalid_response(err: serde_json::Error) -> Self {
        BridgeError::InvalidResponse {
            message: err.to_string(),
            source: err,
        }
    }

    /// Convert to a JSON-RPC error code.
    ///
    /// Bridge-level failures all share the application-defined `-32000`, so a
    /// caller can only tell them apart from upstream errors by code and message.
    pub fn to_rpc_error_code(&self) -> i32 {
        ProtocolConfig::BRIDGE_ERROR_CODE
    }
}
