//! Core domain types
//!
//! These types are typed views over the JSON bodies returned by the Buildkite
//! REST API. Every field the client does not consume is ignored, and every
//! field it does consume tolerates being absent.

pub mod build;
pub mod job;
pub mod log;
