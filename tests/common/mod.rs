//! Shared test utilities for origins-search integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod fake_neo4j;
pub mod fixtures;

pub use fake_neo4j::*;
pub use fixtures::*;
