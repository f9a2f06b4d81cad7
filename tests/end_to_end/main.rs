//! End-to-End Integration Tests
//!
//! Ingestion → query → export through the public `lexindex` API.

#[path = "../common/mod.rs"]
mod common;

mod pipeline;
mod ranking;
mod threaded;
