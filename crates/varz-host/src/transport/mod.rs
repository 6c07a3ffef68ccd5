//! Transport layer: record codec and the stdio session loop.

pub mod codec;
pub mod stdio;
