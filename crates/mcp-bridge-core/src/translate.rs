//! Per-line pipeline and error translation.
//!
//! Every non-blank input line yields at most one output message: the upstream
//! reply, nothing (for an empty upstream body), or a JSON-RPC error envelope
//! describing what went wrong.

use crate::protocol::{request_id, request_method, ErrorEnvelope};
use crate::session::SessionTracker;
use crate::sse::{self, Extracted};
use crate::transport::Transport;
use crate::{BridgeError, Result};
use serde_json::Value;
use tracing::{debug, warn};

/// Recover the request id from a raw input line.
///
/// Parses the line again on its own, so it works no matter which stage
/// failed. Anything that is not an object with an `id` gives `null`.
pub fn recover_id(line: &str) -> Value {
    serde_json::from_str::<Value>(line)
        .ok()
        .as_ref()
        .and_then(request_id)
        .cloned()
        .unwrap_or(Value::Null)
}

/// Build the error reply for a failed line.
pub fn error_reply(line: &str, err: &BridgeError) -> Value {
    ErrorEnvelope::new(recover_id(line), err.to_rpc_error_code(), err.to_string()).into_value()
}

/// Parse, send and decode one line, propagating the first failure.
pub async fn forward_line<T: Transport + ?Sized>(
    transport: &T,
    session: &mut SessionTracker,
    line: &str,
) -> Result<Extracted> {
    let request: Value = serde_json::from_str(line).map_err(BridgeError::invalid_request)?;

    debug!(
        "Forwarding {} (id {})",
        request_method(&request).unwrap_or("<no method>"),
        request_id(&request).map_or_else(|| "none".to_string(), |id| id.to_string())
    );

    let raw = transport.send(session, &request).await?;
    if !raw.is_success() {
        debug!("Upstream answered HTTP {}; decoding body anyway", raw.status);
    }

    sse::extract(&raw.body, raw.format())
}

/// Run the full pipeline for one line and decide what to emit.
///
/// Never fails: pipeline errors become an error envelope carrying the
/// recovered request id.
pub async fn process_line<T: Transport + ?Sized>(
    transport: &T,
    session: &mut SessionTracker,
    line: &str,
) -> Option<Value> {
    match forward_line(transport, session, line).await {
        Ok(Extracted::Message(message)) => Some(message),
        Ok(Extracted::NoResponse) => {
            debug!("Upstream returned an empty body; no reply written");
            None
        }
        Err(e) => {
            warn!("Request failed: {}", e);
            Some(error_reply(line, &e))
        }
    }
}
