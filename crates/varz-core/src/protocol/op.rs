//! Operation descriptors consumed by the executor.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VarzError};
use crate::time::VarzTime;

/// Longest accepted variable name, in bytes. Longer names are rejected.
pub const MAX_VARIABLE_NAME_LEN: usize = 255;

/// Bounds-checked variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VariableName(String);

impl VariableName {
    /// Validate a name: non-empty, at most `MAX_VARIABLE_NAME_LEN` bytes.
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(VarzError::EmptyName);
        }
        if name.len() > MAX_VARIABLE_NAME_LEN {
            return Err(VarzError::NameTooLong {
                len: name.len(),
                max: MAX_VARIABLE_NAME_LEN,
            });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&str> for VariableName {
    type Error = VarzError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operation kind, with stable numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpKind {
    Invalid = 0,
    CounterAdd = 1,
    SamplerAdd = 2,
    DumpAllJson = 3,
    ListAllJson = 4,
    FlushAll = 5,
    CounterGet = 6,
}

impl OpKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OpKind::Invalid => "invalid",
            OpKind::CounterAdd => "counter_add",
            OpKind::SamplerAdd => "sampler_add",
            OpKind::DumpAllJson => "dump_all_json",
            OpKind::ListAllJson => "list_all_json",
            OpKind::FlushAll => "flush_all",
            OpKind::CounterGet => "counter_get",
        }
    }

    /// Whether the kind addresses a single variable.
    pub fn needs_name(self) -> bool {
        matches!(
            self,
            OpKind::CounterAdd | OpKind::SamplerAdd | OpKind::CounterGet
        )
    }
}

impl TryFrom<u8> for OpKind {
    type Error = VarzError;

    fn try_from(code: u8) -> Result<Self> {
        Ok(match code {
            0 => OpKind::Invalid,
            1 => OpKind::CounterAdd,
            2 => OpKind::SamplerAdd,
            3 => OpKind::DumpAllJson,
            4 => OpKind::ListAllJson,
            5 => OpKind::FlushAll,
            6 => OpKind::CounterGet,
            other => return Err(VarzError::UnknownOperation(format!("code {other}"))),
        })
    }
}

impl FromStr for OpKind {
    type Err = VarzError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "invalid" => OpKind::Invalid,
            "counter_add" => OpKind::CounterAdd,
            "sampler_add" => OpKind::SamplerAdd,
            "dump_all_json" => OpKind::DumpAllJson,
            "list_all_json" => OpKind::ListAllJson,
            "flush_all" => OpKind::FlushAll,
            "counter_get" => OpKind::CounterGet,
            other => return Err(VarzError::UnknownOperation(other.to_string())),
        })
    }
}

/// Kind plus kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Invalid,
    CounterAdd {
        time: VarzTime,
        amount: i64,
    },
    SamplerAdd {
        time: VarzTime,
        value: i64,
        randomness: [u64; 2],
    },
    DumpAllJson,
    ListAllJson,
    FlushAll,
    CounterGet,
}

impl Operation {
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Invalid => OpKind::Invalid,
            Operation::CounterAdd { .. } => OpKind::CounterAdd,
            Operation::SamplerAdd { .. } => OpKind::SamplerAdd,
            Operation::DumpAllJson => OpKind::DumpAllJson,
            Operation::ListAllJson => OpKind::ListAllJson,
            Operation::FlushAll => OpKind::FlushAll,
            Operation::CounterGet => OpKind::CounterGet,
        }
    }
}

/// A complete request for the executor.
///
/// Only descriptors built through these constructors (or
/// [`OperationRecord`](crate::protocol::record::OperationRecord)) reach the
/// executor, so a named kind always carries a validated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    variable_name: VariableName,
    op: Operation,
}

impl OperationDescriptor {
    /// Pair an operation with a name. Named kinds require a non-empty name.
    pub fn new(variable_name: VariableName, op: Operation) -> Result<Self> {
        if op.kind().needs_name() && variable_name.is_empty() {
            return Err(VarzError::EmptyName);
        }
        Ok(Self { variable_name, op })
    }

    pub fn invalid() -> Self {
        Self::unnamed(Operation::Invalid)
    }

    pub fn counter_add(name: &str, time: VarzTime, amount: i64) -> Result<Self> {
        Self::new(VariableName::new(name)?, Operation::CounterAdd { time, amount })
    }

    pub fn sampler_add(
        name: &str,
        time: VarzTime,
        value: i64,
        randomness: [u64; 2],
    ) -> Result<Self> {
        Self::new(
            VariableName::new(name)?,
            Operation::SamplerAdd {
                time,
                value,
                randomness,
            },
        )
    }

    pub fn counter_get(name: &str) -> Result<Self> {
        Self::new(VariableName::new(name)?, Operation::CounterGet)
    }

    pub fn dump_all_json() -> Self {
        Self::unnamed(Operation::DumpAllJson)
    }

    pub fn list_all_json() -> Self {
        Self::unnamed(Operation::ListAllJson)
    }

    pub fn flush_all() -> Self {
        Self::unnamed(Operation::FlushAll)
    }

    fn unnamed(op: Operation) -> Self {
        Self {
            variable_name: VariableName::default(),
            op,
        }
    }

    pub fn variable_name(&self) -> &VariableName {
        &self.variable_name
    }

    pub fn op(&self) -> &Operation {
        &self.op
    }

    pub fn kind(&self) -> OpKind {
        self.op.kind()
    }
}
