use serde::Deserialize;
use varz_core::error::{Result, VarzError};
use varz_core::EngineOptions;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VarzConfig {
    pub version: u32,

    #[serde(default)]
    pub engine: EngineSection,

    #[serde(default)]
    pub worker: WorkerSection,
}

impl Default for VarzConfig {
    fn default() -> Self {
        Self {
            version: 1,
            engine: EngineSection::default(),
            worker: WorkerSection::default(),
        }
    }
}

impl VarzConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(VarzError::UnsupportedVersion);
        }
        self.engine.validate()?;
        self.worker.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    /// Slots per store. Fixed for the engine's lifetime, kept across flushes.
    #[serde(default = "default_slot_count")]
    pub slot_count: usize,

    #[serde(default = "default_sampler_capacity")]
    pub sampler_capacity: usize,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            slot_count: default_slot_count(),
            sampler_capacity: default_sampler_capacity(),
        }
    }
}

impl EngineSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=1_048_576).contains(&self.slot_count) {
            return Err(VarzError::BadRequest(
                "engine.slot_count must be between 1 and 1048576".into(),
            ));
        }
        if !(1..=1_000_000).contains(&self.sampler_capacity) {
            return Err(VarzError::BadRequest(
                "engine.sampler_capacity must be between 1 and 1000000".into(),
            ));
        }
        Ok(())
    }

    pub fn options(&self) -> EngineOptions {
        EngineOptions {
            slot_count: self.slot_count,
            sampler_capacity: self.sampler_capacity,
        }
    }
}

fn default_slot_count() -> usize {
    1024
}
fn default_sampler_capacity() -> usize {
    1000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkerSection {
    /// Pending requests buffered in front of the engine task.
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

impl Default for WorkerSection {
    fn default() -> Self {
        Self {
            queue_depth: default_queue_depth(),
        }
    }
}

impl WorkerSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=65_536).contains(&self.queue_depth) {
            return Err(VarzError::BadRequest(
                "worker.queue_depth must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }
}

fn default_queue_depth() -> usize {
    1024
}
