//! Upstream session tracking.
//!
//! The upstream may hand out an opaque session id on any response. The bridge
//! never invents one; it adopts whatever the upstream sent last and echoes it
//! on every later request.

use tracing::debug;

/// Holds the most recently observed session id.
#[derive(Debug, Default, Clone)]
pub struct SessionTracker {
    current: Option<String>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session id to attach to the next request, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref().filter(|id| !id.is_empty())
    }

    /// Adopt a session id returned by the upstream.
    ///
    /// A newer value always replaces the tracked one. Empty values are ignored.
    pub fn adopt(&mut self, session_id: &str) {
        if session_id.is_empty() {
            return;
        }
        if self.current.as_deref() != Some(session_id) {
            debug!("Adopting upstream session id {}", session_id);
            self.current = Some(session_id.to_string());
        }
    }
}
