//! varz host library entry.
//!
//! Wires config, the single-owner engine task, and the stdio transport into
//! a process that serves the metrics engine. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod engine;
pub mod transport;
