//! origins-core — shared building blocks for origins-search.
//!
//! Every search runs the same three steps:
//!
//! ```text
//! SearchRequest ──► query::build_query ──► (HTTP, origins-cypher) ──► response::decode ──► render
//! ```
//!
//! This crate owns the pure parts (building the Cypher statement, decoding
//! the row array, rendering fragments) plus configuration and the error type
//! shared by the client and the UI.

pub mod config;
pub mod error;
pub mod query;
pub mod render;
pub mod response;
pub mod types;

pub use error::SearchError;
pub use query::{build_query, CypherQuery, ParamStyle, QueryOptions};
pub use types::{ResultRecord, ResultSet, SearchRequest};
