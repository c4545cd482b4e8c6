//! JSON-RPC envelope types emitted by the bridge itself.
//!
//! Requests and upstream responses travel as opaque `serde_json::Value`s; the
//! only structure the bridge writes on its own is the error reply.

use crate::config::ProtocolConfig;
use serde::Serialize;
use serde_json::Value;

/// JSON-RPC 2.0 error response produced when a line cannot be bridged.
///
/// Field order matters for the wire format: `jsonrpc`, `id`, `error`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub jsonrpc: String,
    pub id: Value,
    pub error: ErrorObject,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
}

impl ErrorEnvelope {
    /// Create an error response for the given request id (`null` when unknown).
    pub fn new(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: ProtocolConfig::JSONRPC_VERSION.to_string(),
            id,
            error: ErrorObject {
                code,
                message: message.into(),
            },
        }
    }

    pub fn into_value(self) -> Value {
        // Serializing plain strings/numbers/Values into a Value cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Read the `id` of a request envelope, if it has one.
///
/// Non-object requests and objects without `id` yield `None`; an explicit
/// `"id": null` yields `Some(Value::Null)`.
pub fn request_id(request: &Value) -> Option<&Value> {
    request.as_object().and_then(|obj| obj.get("id"))
}

/// Read the `method` of a request envelope for logging.
pub fn request_method(request: &Value) -> Option<&str> {
    request.get("method").and_then(Value::as_str)
}
