//! Query builder — turns a [`SearchRequest`] into a Cypher statement and its
//! parameter map.
//!
//! The term never enters the statement text. It is wrapped as a
//! case-insensitive "contains" regex and sent as the `search` parameter:
//!
//! ```text
//! MATCH (n:Element) WHERE n.label =~ { search } RETURN n.label, n.uri
//! params: { "search": "(?i).*<term>.*" }
//! ```
//!
//! Page and limit are always computed but only reach the server when
//! [`QueryOptions::paginate`] is set.

use crate::types::SearchRequest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the parameter carrying the wrapped term.
pub const SEARCH_PARAM: &str = "search";

/// How the `search` parameter is referenced in the statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamStyle {
    /// `{ search }` — accepted by the legacy `/db/data/cypher` endpoint.
    #[default]
    Legacy,
    /// `$search` — required by Neo4j 4 and later.
    Dollar,
}

impl ParamStyle {
    fn placeholder(self, name: &str) -> String {
        match self {
            ParamStyle::Legacy => format!("{{ {name} }}"),
            ParamStyle::Dollar => format!("${name}"),
        }
    }
}

/// Knobs for [`build_query`]. The defaults reproduce the unpaginated,
/// unescaped behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub node_label: String,
    pub param_style: ParamStyle,
    /// Append `SKIP`/`LIMIT` for the request's page.
    pub paginate: bool,
    /// Escape regex metacharacters in the term before wrapping it.
    pub escape_term: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            node_label: "Element".to_string(),
            param_style: ParamStyle::Legacy,
            paginate: false,
            escape_term: false,
        }
    }
}

/// Wire body of a Cypher call: `{"query": ..., "params": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CypherQuery {
    pub query: String,
    pub params: BTreeMap<String, String>,
}

impl CypherQuery {
    /// The `search` parameter, if a filter was applied.
    pub fn search_param(&self) -> Option<&str> {
        self.params.get(SEARCH_PARAM).map(String::as_str)
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Wrap a term as a case-insensitive substring regex.
pub fn contains_pattern(term: &str, escape: bool) -> String {
    if escape {
        format!("(?i).*{}.*", regex::escape(term))
    } else {
        format!("(?i).*{term}.*")
    }
}

/// Build the statement and parameters for `request`.
pub fn build_query(request: &SearchRequest, options: &QueryOptions) -> CypherQuery {
    let mut query = format!("MATCH (n:{}) ", options.node_label);
    let mut params = BTreeMap::new();

    if let Some(term) = request.trimmed_term() {
        query.push_str(&format!(
            "WHERE n.label =~ {} ",
            options.param_style.placeholder(SEARCH_PARAM)
        ));
        params.insert(
            SEARCH_PARAM.to_string(),
            contains_pattern(term, options.escape_term),
        );
    }

    query.push_str("RETURN n.label, n.uri");

    if options.paginate {
        query.push_str(&format!(" SKIP {} LIMIT {}", request.skip(), request.limit));
    }

    CypherQuery { query, params }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
