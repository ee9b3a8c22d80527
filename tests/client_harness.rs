//! Cypher client integration harness.
//!
//! # What this covers
//!
//! - **Wire shape**: one POST per search, JSON body `{query, params}`, the
//!   term carried only in `params.search` as `(?i).*term.*`.
//! - **Decoding**: rows come back in server order; empty `data` is an empty
//!   list, not an error.
//! - **Failures**: non-2xx, malformed JSON, timeouts and refused connections
//!   each surface as their own [`SearchError`] variant.
//! - **Auth**: configured credentials become a Basic `Authorization` header.
//!
//! # Running
//!
//! ```sh
//! cargo test --test client_harness
//! ```

mod common;
use common::*;

use std::time::Duration;

use origins_core::query::{ParamStyle, QueryOptions};
use origins_core::{build_query, ResultRecord, SearchError, SearchRequest};
use origins_cypher::CypherClient;
use pretty_assertions::assert_eq;

async fn search(neo: &FakeNeo4j, request: SearchRequest) -> Result<Vec<ResultRecord>, SearchError> {
    let config = neo.config();
    let client = CypherClient::new(&config.neo4j).unwrap();
    client
        .execute(&build_query(&request, &config.search.query_options()))
        .await
}

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn term_is_sent_as_param() {
    let neo = FakeNeo4j::start().await.unwrap();
    search(&neo, SearchRequest::term("gene")).await.unwrap();

    let requests = neo.requests().await;
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(
        req.query(),
        "MATCH (n:Element) WHERE n.label =~ { search } RETURN n.label, n.uri"
    );
    assert_eq!(req.search_param(), Some("(?i).*gene.*"));
    assert!(!req.query().contains("gene"));
    assert_eq!(req.content_type.as_deref(), Some("application/json"));
    assert_eq!(req.authorization, None);
}

#[tokio::test]
async fn blank_term_sends_no_filter() {
    let neo = FakeNeo4j::start().await.unwrap();
    search(&neo, SearchRequest::term("   ")).await.unwrap();

    let req = &neo.requests().await[0];
    assert_eq!(req.query(), "MATCH (n:Element) RETURN n.label, n.uri");
    assert_eq!(req.search_param(), None);
}

#[tokio::test]
async fn dollar_params_and_pagination() {
    let neo = FakeNeo4j::start().await.unwrap();
    let config = neo.config();
    let client = CypherClient::new(&config.neo4j).unwrap();
    let options = QueryOptions {
        param_style: ParamStyle::Dollar,
        paginate: true,
        ..QueryOptions::default()
    };
    let request = SearchRequest::term("x").with_page(3).with_limit(20);
    client.execute(&build_query(&request, &options)).await.unwrap();

    let req = &neo.requests().await[0];
    assert_eq!(
        req.query(),
        "MATCH (n:Element) WHERE n.label =~ $search RETURN n.label, n.uri SKIP 40 LIMIT 20"
    );
}

#[tokio::test]
async fn credentials_become_basic_auth() {
    let neo = FakeNeo4j::start().await.unwrap();
    let mut config = neo.config();
    config.neo4j.username = Some("neo4j".to_string());
    config.neo4j.password = Some("secret".to_string());
    let client = CypherClient::new(&config.neo4j).unwrap();
    client
        .execute(&build_query(&SearchRequest::all(), &QueryOptions::default()))
        .await
        .unwrap();

    let req = &neo.requests().await[0];
    assert_eq!(req.authorization.as_deref(), Some("Basic bmVvNGo6c2VjcmV0"));
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rows_keep_server_order() {
    let neo = FakeNeo4j::start().await.unwrap();
    neo.set_rows(TWO_ROWS).await;

    let records = search(&neo, SearchRequest::term("gene")).await.unwrap();
    assert_eq!(records, common::records(TWO_ROWS));
}

#[tokio::test]
async fn empty_data_is_empty_list() {
    let neo = FakeNeo4j::start().await.unwrap();
    neo.set_rows(&[]).await;

    let records = search(&neo, SearchRequest::term("zzz")).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn missing_data_key_is_empty_list() {
    let neo = FakeNeo4j::start().await.unwrap();
    neo.set_body(serde_json::json!({ "columns": [] })).await;

    let records = search(&neo, SearchRequest::all()).await.unwrap();
    assert!(records.is_empty());
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_is_status() {
    let neo = FakeNeo4j::start().await.unwrap();
    neo.set_raw(500, "boom").await;

    let err = search(&neo, SearchRequest::term("gene")).await.unwrap_err();
    match err {
        SearchError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let neo = FakeNeo4j::start().await.unwrap();
    neo.set_raw(200, "not json").await;

    let err = search(&neo, SearchRequest::term("gene")).await.unwrap_err();
    assert!(matches!(err, SearchError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn slow_server_times_out() {
    let neo = FakeNeo4j::start().await.unwrap();
    neo.delay("(?i).*slow.*", Duration::from_millis(500)).await;
    let mut config = neo.config();
    config.neo4j.timeout_ms = 50;
    let client = CypherClient::new(&config.neo4j).unwrap();

    let err = client
        .execute(&build_query(&SearchRequest::term("slow"), &QueryOptions::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Timeout(50)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut config = origins_core::config::Config::defaults();
    config.neo4j.host = "127.0.0.1".to_string();
    config.neo4j.port = port;
    let client = CypherClient::new(&config.neo4j).unwrap();

    let err = client
        .execute(&build_query(&SearchRequest::all(), &QueryOptions::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Transport(_)), "got {err:?}");
}
