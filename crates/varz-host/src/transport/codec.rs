//! Decode-once codec for the stdio transport.
//!
//! - One JSON operation record per line => `OperationDescriptor`
//! - Blank lines are skipped
//! - Sampler records without `randomness` get two fresh draws here, so the
//!   engine itself stays deterministic

use rand::Rng;
use serde_json::json;

use varz_core::error::{Result, VarzError};
use varz_core::protocol::{OpKind, OperationRecord};
use varz_core::OperationDescriptor;

pub fn decode_line(line: &str) -> Result<Option<OperationDescriptor>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let mut record = OperationRecord::from_json(line)?;
    fill_randomness(&mut record)?;
    record.into_descriptor().map(Some)
}

fn fill_randomness(record: &mut OperationRecord) -> Result<()> {
    if record.randomness.is_some() || record.op.kind()? != OpKind::SamplerAdd {
        return Ok(());
    }
    let mut rng = rand::thread_rng();
    record.randomness = Some([rng.gen(), rng.gen()]);
    Ok(())
}

/// Error line written back in place of a result.
pub fn error_json(err: &VarzError) -> String {
    json!({
        "error": {
            "code": err.code().as_str(),
            "msg": err.to_string()
        }
    })
    .to_string()
}

