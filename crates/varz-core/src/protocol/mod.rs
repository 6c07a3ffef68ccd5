//! Operation protocol.
//!
//! - `op`: typed descriptors the executor consumes.
//! - `record`: the JSON record form fed in by hosts, converted to descriptors.
//!
//! Unknown kinds, missing payload fields and bad names are reported as
//! `VarzError` during conversion, before anything reaches a store.

pub mod op;
pub mod record;

pub use op::{OpKind, Operation, OperationDescriptor, VariableName, MAX_VARIABLE_NAME_LEN};
pub use record::{OpCode, OperationRecord};
