//! Core types for origins-core.
//!
//! A [`SearchRequest`] goes out, a [`ResultSet`] of [`ResultRecord`]s comes
//! back. Nothing here outlives a single render pass.

use serde::Serialize;

/// Page shown when none is given.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when none is given.
pub const DEFAULT_LIMIT: u64 = 100;

/// User input for one search. Every field is optional in spirit; the
/// defaults are filled in by [`SearchRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Raw term as typed. Trimmed by the query builder, not here.
    pub term: Option<String>,
    /// 1-based page number.
    pub page: u64,
    /// Rows per page.
    pub limit: u64,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            term: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchRequest {
    pub fn new(term: Option<String>, page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            term,
            page: page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE),
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// An unparameterized request — the one fired on startup.
    pub fn all() -> Self {
        Self::default()
    }

    /// A request for `term` with the default page and limit.
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// The trimmed term, or `None` when the term is absent or blank.
    pub fn trimmed_term(&self) -> Option<&str> {
        self.term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Number of rows to skip for the current page.
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// One row of the response: `(label, uri)` taken positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub label: String,
    pub uri: String,
}

impl ResultRecord {
    pub fn new(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            uri: uri.into(),
        }
    }
}

/// The records of a single response, tagged with the dispatch that produced
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    /// Sequence number of the request. Higher is newer.
    pub seq: u64,
    /// The request this set answers.
    pub request: SearchRequest,
    /// Records in response order.
    pub records: Vec<ResultRecord>,
    /// When the response was decoded.
    pub received_at: chrono::DateTime<chrono::Utc>,
}

impl ResultSet {
    pub fn new(seq: u64, request: SearchRequest, records: Vec<ResultRecord>) -> Self {
        Self {
            seq,
            request,
            records,
            received_at: chrono::Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_page_and_limit() {
        let req = SearchRequest::new(None, None, None);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 100);
        assert_eq!(req, SearchRequest::all());
    }

    #[test]
    fn zero_page_and_limit_fall_back_to_defaults() {
        let req = SearchRequest::new(Some("x".into()), Some(0), Some(0));
        assert_eq!(req.page, DEFAULT_PAGE);
        assert_eq!(req.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn trimmed_term_drops_blank_input() {
        assert_eq!(SearchRequest::term("  ").trimmed_term(), None);
        assert_eq!(SearchRequest::term("").trimmed_term(), None);
        assert_eq!(SearchRequest::all().trimmed_term(), None);
        assert_eq!(SearchRequest::term("  gene ").trimmed_term(), Some("gene"));
    }

    #[test]
    fn skip_is_zero_on_first_page() {
        assert_eq!(SearchRequest::all().skip(), 0);
        assert_eq!(SearchRequest::all().with_page(3).with_limit(10).skip(), 20);
    }

    #[test]
    fn skip_saturates() {
        let req = SearchRequest::all().with_page(u64::MAX).with_limit(u64::MAX);
        assert_eq!(req.skip(), u64::MAX);
    }
}
