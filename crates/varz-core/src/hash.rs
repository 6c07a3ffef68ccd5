//! Variable-name hashing.

use std::hash::Hasher;

use rustc_hash::FxHasher;

/// Hash a variable name. Deterministic across processes, so `name_hash`
/// values in snapshots are comparable between runs.
pub fn hash_name(name: &str) -> u64 {
    let mut h = FxHasher::default();
    h.write(name.as_bytes());
    h.finish()
}
