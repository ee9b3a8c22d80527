//! HTTP client for the Cypher endpoint.
//!
//! Sends `{"query": ..., "params": {...}}` as JSON and expects
//! `{"data": [[label, uri], ...]}` back. Failures are classified into
//! [`SearchError`] variants and returned as-is; nothing is retried.

use std::future::Future;
use std::time::Duration;

use base64::Engine;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use origins_core::config::Neo4jConfig;
use origins_core::error::Result;
use origins_core::{response, CypherQuery, ResultRecord, SearchError};

/// Anything that can answer a Cypher search. The worker is generic over this
/// so tests can swap in an in-memory backend.
pub trait SearchBackend: Send + Sync + 'static {
    fn search(&self, query: &CypherQuery)
        -> impl Future<Output = Result<Vec<ResultRecord>>> + Send;
}

/// The real backend: hyper over plain HTTP.
#[derive(Clone)]
pub struct CypherClient {
    http: Client<HttpConnector, Full<Bytes>>,
    endpoint: Uri,
    timeout: Option<Duration>,
    authorization: Option<String>,
}

impl std::fmt::Debug for CypherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CypherClient")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("auth", &self.authorization.is_some())
            .finish()
    }
}

impl CypherClient {
    /// Build a client from the `[neo4j]` section.
    pub fn new(config: &Neo4jConfig) -> Result<Self> {
        let endpoint_str = config.endpoint();
        let endpoint: Uri = endpoint_str
            .parse()
            .map_err(|_| SearchError::InvalidUri(endpoint_str.clone()))?;

        let authorization = config.credentials().map(|(user, pass)| {
            let token = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{pass}"));
            format!("Basic {token}")
        });

        Ok(Self {
            http: Client::builder(TokioExecutor::new()).build_http(),
            endpoint,
            timeout: config.timeout(),
            authorization,
        })
    }

    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Perform one POST and decode the rows.
    pub async fn execute(&self, query: &CypherQuery) -> Result<Vec<ResultRecord>> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.round_trip(query))
                .await
                .map_err(|_| SearchError::Timeout(limit.as_millis() as u64))?,
            None => self.round_trip(query).await,
        }
    }

    async fn round_trip(&self, query: &CypherQuery) -> Result<Vec<ResultRecord>> {
        let body = query.to_json()?;

        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(auth) = &self.authorization {
            builder = builder.header(AUTHORIZATION, auth.as_str());
        }
        let request = builder
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        tracing::debug!(endpoint = %self.endpoint, query = %query.query, "cypher: POST");

        let response = self
            .http
            .request(request)
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?
            .to_bytes();

        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let records = response::decode(&bytes)?;
        tracing::debug!(rows = records.len(), "cypher: decoded");
        Ok(records)
    }
}

impl SearchBackend for CypherClient {
    async fn search(&self, query: &CypherQuery) -> Result<Vec<ResultRecord>> {
        self.execute(query).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
