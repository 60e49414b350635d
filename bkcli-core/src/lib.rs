//! bkcli Core
//!
//! Core types for the bkcli Buildkite client.
//!
//! This crate contains:
//! - Domain types: read-only views of builds and jobs as returned by the API
//! - Log snapshots: line arithmetic used when tailing a running job

pub mod domain;
