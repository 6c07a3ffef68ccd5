//! Host config loader (strict parsing).

pub mod schema;

use std::fs;

use varz_core::error::{Result, VarzError};

pub use schema::{EngineSection, VarzConfig, WorkerSection};

pub fn load_from_file(path: &str) -> Result<VarzConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| VarzError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<VarzConfig> {
    let cfg: VarzConfig = serde_yaml::from_str(s)
        .map_err(|e| VarzError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
