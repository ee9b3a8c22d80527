//! Fake Neo4j HTTP endpoint for integration tests.
//!
//! Spins up a minimal `axum` server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `POST /db/data/cypher` — answers with the configured rows (or an error
//!   status), after an optional per-term delay
//!
//! Every request body and `Authorization` header is recorded so tests can
//! assert on what the client actually sent.
//!
//! # Example
//!
//! ```rust,ignore
//! let neo = FakeNeo4j::start().await.unwrap();
//! neo.set_rows(&[("Gene A", "http://ex/a")]).await;
//! let config = neo.config();
//! ```

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use origins_core::config::Config;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A request as seen by the server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub body: Value,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

impl RecordedRequest {
    pub fn query(&self) -> &str {
        self.body["query"].as_str().unwrap_or_default()
    }

    pub fn search_param(&self) -> Option<&str> {
        self.body["params"]["search"].as_str()
    }
}

/// What the next responses look like.
#[derive(Debug, Clone)]
enum Reply {
    Rows(Value),
    Raw(StatusCode, String),
}

struct ApiState {
    reply: Reply,
    /// Delay keyed by the `search` param (`""` for an unfiltered query).
    delays: HashMap<String, Duration>,
    requests: Vec<RecordedRequest>,
}

impl Default for ApiState {
    fn default() -> Self {
        Self {
            reply: Reply::Rows(json!({ "columns": ["n.label", "n.uri"], "data": [] })),
            delays: HashMap::new(),
            requests: Vec::new(),
        }
    }
}

/// Handle to the running fake server.
pub struct FakeNeo4j {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeNeo4j {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/db/data/cypher", post(cypher))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Default config pointed at this server.
    pub fn config(&self) -> Config {
        let mut config = Config::defaults();
        config.neo4j.host = "127.0.0.1".to_string();
        config.neo4j.port = self.port();
        config.neo4j.timeout_ms = 2_000;
        config
    }

    /// Answer with these `(label, uri)` rows.
    pub async fn set_rows(&self, rows: &[(&str, &str)]) {
        let data: Vec<Value> = rows.iter().map(|(l, u)| json!([l, u])).collect();
        self.set_body(json!({ "columns": ["n.label", "n.uri"], "data": data }))
            .await;
    }

    /// Answer 200 with an arbitrary JSON body.
    pub async fn set_body(&self, body: Value) {
        self.state.lock().await.reply = Reply::Rows(body);
    }

    /// Answer with a fixed status and raw body.
    pub async fn set_raw(&self, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).unwrap();
        self.state.lock().await.reply = Reply::Raw(status, body.to_string());
    }

    /// Hold responses for requests whose `search` param equals `param`.
    pub async fn delay(&self, param: &str, by: Duration) {
        self.state.lock().await.delays.insert(param.to_string(), by);
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn cypher(
    State(state): State<Arc<Mutex<ApiState>>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = RecordedRequest {
        authorization: header("authorization"),
        content_type: header("content-type"),
        body,
    };

    let key = recorded.search_param().unwrap_or_default().to_string();
    let (reply, delay) = {
        let mut state = state.lock().await;
        state.requests.push(recorded);
        (state.reply.clone(), state.delays.get(&key).copied())
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    match reply {
        Reply::Rows(value) => (StatusCode::OK, value.to_string()),
        Reply::Raw(status, body) => (status, body),
    }
}
