//! origins-cypher — talks to the Neo4j Cypher endpoint.
//!
//! - [`client`]: one HTTP `POST` per search, decoded into result records.
//! - [`debounce`]: collapses keystroke bursts into a single value.
//! - [`worker`]: ties the two together and reports results over a channel.

pub mod client;
pub mod debounce;
pub mod worker;

pub use client::{CypherClient, SearchBackend};
pub use debounce::Debouncer;
pub use worker::{SearchEvent, SearchWorker, WorkerOptions};
