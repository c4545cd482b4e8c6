//! Response body decoding.
//!
//! The upstream answers a POST either with a plain JSON body or with a
//! Server-Sent-Events stream carrying the JSON-RPC message in `data:` fields.
//! Which path is taken depends only on the declared content type.

use crate::config::ProtocolConfig;
use crate::{BridgeError, Result};
use serde_json::Value;

/// Wire format of an upstream response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    EventStream,
}

impl ResponseFormat {
    /// Resolve the format from a `content-type` header value.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct)
                if ct
                    .to_ascii_lowercase()
                    .contains(ProtocolConfig::EVENT_STREAM_MEDIA_TYPE) =>
            {
                ResponseFormat::EventStream
            }
            _ => ResponseFormat::Json,
        }
    }
}

/// Outcome of decoding one response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// A JSON-RPC message to forward to the stdio peer.
    Message(Value),
    /// Empty body; nothing is written for this request.
    NoResponse,
}

/// Decode a response body according to its format.
pub fn extract(body: &str, format: ResponseFormat) -> Result<Extracted> {
    if body.trim().is_empty() {
        return Ok(Extracted::NoResponse);
    }

    let payload = match format {
        ResponseFormat::Json => body.to_string(),
        ResponseFormat::EventStream => first_event_data(body).ok_or(BridgeError::MissingSseData)?,
    };

    serde_json::from_str(&payload)
        .map(Extracted::Message)
        .map_err(BridgeError::invalid_response)
}

/// Reassemble the data of the first event in an SSE body.
///
/// Consecutive `data:` lines are joined with `\n`. The event ends at the
/// first blank line after some data was seen, or at the end of the body.
/// Returns `None` if no `data:` line is present.
pub fn first_event_data(body: &str) -> Option<String> {
    let mut data_lines: Vec<&str> = Vec::new();

    for line in body.lines() {
        if line.is_empty() {
            if data_lines.is_empty() {
                continue;
            }
            break;
        }

        if let Some(value) = line.strip_prefix("data:") {
            data_lines.push(value.strip_prefix(' ').unwrap_or(value));
        }
    }

    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}
