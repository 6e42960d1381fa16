//! Test helpers for integration tests
//!
//! Provides a fake presence API server and small waiting utilities. In-memory fakes for
//! the host and presence ports come from `bridge_runtime::test_support`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use bridge_common::{GraphSettings, PresenceSettings};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::presence_body;

// ============================================================================
// Fake presence API server
// ============================================================================

/// A request received by the fake server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

struct GraphState {
    read_response: Mutex<(StatusCode, String)>,
    write_response: Mutex<(StatusCode, String)>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl GraphState {
    fn record(&self, method: &'static str, path: String, headers: &HeaderMap, body: Option<Value>) {
        let header_value = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        self.requests.lock().push(RecordedRequest {
            method,
            path,
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body,
        });
    }
}

/// In-process stand-in for the Graph presence endpoints, served under `/v1.0`
pub struct FakeGraphServer {
    pub addr: SocketAddr,
    state: Arc<GraphState>,
    _handle: JoinHandle<()>,
}

impl FakeGraphServer {
    /// Start the server on an ephemeral port, reporting `Available/Available`
    pub async fn start() -> Result<Self> {
        let state = Arc::new(GraphState {
            read_response: Mutex::new((
                StatusCode::OK,
                presence_body("Available", "Available").to_string(),
            )),
            write_response: Mutex::new((StatusCode::OK, String::new())),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1.0/me/presence", get(read_presence))
            .route(
                "/v1.0/users/:id/presence/setUserPreferredPresence",
                post(write_preferred_presence),
            )
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            _handle: handle,
        })
    }

    /// Base URL to configure the client with
    pub fn base_url(&self) -> String {
        format!("http://{}/v1.0", self.addr)
    }

    pub fn settings(&self) -> GraphSettings {
        GraphSettings {
            base_url: self.base_url(),
            connect_timeout_secs: 2,
            request_timeout_secs: 5,
        }
    }

    pub fn set_presence(&self, availability: &str, activity: &str) {
        *self.state.read_response.lock() = (
            StatusCode::OK,
            presence_body(availability, activity).to_string(),
        );
    }

    pub fn respond_to_reads(&self, status: StatusCode, body: &str) {
        *self.state.read_response.lock() = (status, body.to_string());
    }

    pub fn respond_to_writes(&self, status: StatusCode, body: &str) {
        *self.state.write_response.lock() = (status, body.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn reads(&self) -> usize {
        self.requests().iter().filter(|r| r.method == "GET").count()
    }

    /// Bodies of all preferred presence writes, in arrival order
    pub fn written_bodies(&self) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST")
            .filter_map(|r| r.body)
            .collect()
    }
}

async fn read_presence(
    State(state): State<Arc<GraphState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.record("GET", "/me/presence".to_string(), &headers, None);
    let (status, body) = state.read_response.lock().clone();
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

async fn write_preferred_presence(
    State(state): State<Arc<GraphState>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.record(
        "POST",
        format!("/users/{user_id}/presence/setUserPreferredPresence"),
        &headers,
        serde_json::from_str(&body).ok(),
    );
    state.write_response.lock().clone()
}

// ============================================================================
// Utilities
// ============================================================================

/// Poll settings with the given interval and the default promotion
pub fn presence_settings(poll_interval_ms: u64) -> PresenceSettings {
    PresenceSettings {
        poll_interval_ms,
        ..PresenceSettings::default()
    }
}

/// Wait until `condition` holds, checking every 10ms. Returns whether it did in time.
pub async fn wait_until<F>(timeout: Duration, condition: F) -> bool
where
    F: Fn() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
