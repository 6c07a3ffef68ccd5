//! varz core: the in-process metrics engine.
//!
//! Named monotonic counters and named reservoir samplers live in two
//! fixed-slot stores owned by an [`Executor`]. Callers hand the executor
//! operation descriptors and get back JSON text for reads. The crate carries
//! no runtime or I/O dependencies; hosts decide how operations arrive.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `VarzError`/`Result`, so a host never crashes on a bad record.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod executor;
pub mod hash;
pub mod json;
pub mod metric;
pub mod protocol;
pub mod store;
pub mod time;

/// Shared result type.
pub use error::{ErrorCode, Result, VarzError};
pub use executor::{EngineOptions, Executor, Metadata};
pub use protocol::{OperationDescriptor, OperationRecord};
