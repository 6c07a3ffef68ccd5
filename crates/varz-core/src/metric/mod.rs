//! Metric entity kinds held by the engine's stores.
//!
//! - `MhtCounter`: monotonic total plus minute/hour windows.
//! - `MhtSampler`: fixed-capacity uniform reservoir of a numeric stream.
//!
//! Both implement [`Metric`], so stores render and tear them down the same way.

pub mod counter;
pub mod sampler;

pub use counter::MhtCounter;
pub use sampler::{MhtSampler, Sample, DEFAULT_SAMPLER_CAPACITY};

use crate::json::JsonWriter;

/// Capability shared by every stored entity.
pub trait Metric {
    /// Append this entity's JSON representation.
    fn write_json(&self, w: &mut JsonWriter);

    /// Free owned buffers. Called exactly once, when the owning store is dropped.
    fn release(&mut self) {}

    /// Standalone JSON text for this entity.
    fn to_json(&self) -> String {
        let mut w = JsonWriter::new();
        self.write_json(&mut w);
        w.finish()
    }
}
