//! Local scripted upstream used by the unit tests.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Response, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// One canned upstream reply.
#[derive(Debug, Clone)]
pub struct Scripted {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub session_id: Option<&'static str>,
    pub body: String,
}

impl Scripted {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            content_type: Some("application/json"),
            session_id: None,
            body: body.to_string(),
        }
    }

    pub fn sse(body: &str) -> Self {
        Self {
            content_type: Some("text/event-stream"),
            ..Self::json(body)
        }
    }

    /// `202 Accepted` with no body, as sent for notifications.
    pub fn accepted() -> Self {
        Self {
            status: 202,
            content_type: None,
            ..Self::json("")
        }
    }

    pub fn with_session(mut self, session_id: &'static str) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

/// What the upstream saw for one request.
#[derive(Debug, Clone)]
pub struct Received {
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub session_id: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct UpstreamState {
    script: Mutex<VecDeque<Scripted>>,
    received: Mutex<Vec<Received>>,
}

/// An HTTP server on `127.0.0.1:0` replaying a script of responses.
pub struct TestUpstream {
    addr: SocketAddr,
    state: Arc<UpstreamState>,
    task: tokio::task::JoinHandle<()>,
}

impl TestUpstream {
    pub async fn start(script: Vec<Scripted>) -> Self {
        let state = Arc::new(UpstreamState {
            script: Mutex::new(script.into()),
            received: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/mcp", post(handle_post))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state, task }
    }

    pub fn url(&self) -> String {
        format!("http://{}/mcp", self.addr)
    }

    pub fn received(&self) -> Vec<Received> {
        self.state.received.lock().unwrap().clone()
    }
}

impl Drop for TestUpstream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn handle_post(
    State(state): State<Arc<UpstreamState>>,
    headers: HeaderMap,
    body: String,
) -> Response<Body> {
    state.received.lock().unwrap().push(Received {
        content_type: header_string(&headers, "content-type"),
        accept: header_string(&headers, "accept"),
        session_id: header_string(&headers, "mcp-session-id"),
        body: serde_json::from_str(&body).unwrap_or(Value::String(body)),
    });

    let reply = state
        .script
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(Scripted::accepted);

    let mut builder = Response::builder()
        .status(StatusCode::from_u16(reply.status).unwrap());
    if let Some(content_type) = reply.content_type {
        builder = builder.header("content-type", content_type);
    }
    if let Some(session_id) = reply.session_id {
        builder = builder.header("mcp-session-id", session_id);
    }
    builder.body(Body::from(reply.body)).unwrap()
}
