//! origins-search — terminal search client for an origins graph.
//!
//! Type a term, and after a short pause the tool asks Neo4j for every
//! `Element` whose label contains it (case-insensitively) and lists the
//! `(label, uri)` pairs that come back.
//!
//! # Architecture
//!
//! ```text
//! keystroke ──► Debouncer ──► query builder ──► POST /db/data/cypher ──► decode ──► render
//! ```
//!
//! The pieces live in the workspace crates, re-exported here so integration
//! tests can import them from one place:
//!
//! - [`origins_core`]: types, config, query builder, decoder, renderer
//! - [`origins_cypher`]: HTTP client, debouncer, search worker
//! - [`origins_tui`]: the ratatui shell

pub mod cli;
pub mod headless;

pub use origins_core as core;
pub use origins_cypher as cypher;
pub use origins_tui as tui;
