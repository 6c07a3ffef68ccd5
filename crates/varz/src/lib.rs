//! Top-level facade crate for varz.
//!
//! Re-exports the engine and the host library so users can depend on a single crate.

pub mod core {
    pub use varz_core::*;
}

pub mod host {
    pub use varz_host::*;
}
