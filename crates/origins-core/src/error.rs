//! Error taxonomy shared by the Cypher client, the worker and the binary.
//!
//! The TUI logs these and shows the message in its status bar while keeping
//! the previous results. Headless mode turns any of them into a non-zero
//! exit.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The connection could not be made or broke mid-request.
    #[error("transport error: {0}")]
    Transport(String),

    /// No response within the configured timeout.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not `{"data": [[...], ...]}`.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The endpoint in the configuration is not a valid URI.
    #[error("invalid endpoint `{0}`")]
    InvalidUri(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, SearchError>;
