//! JSON operation record.
//!
//! One record per operation, e.g.
//! `{"op":"counter_add","name":"rpc.calls","time":27,"amount":1}`.
//! `op` is either the kind name or its numeric code. Payload fields are
//! optional at the serde layer and checked against the kind on conversion.

use serde::Deserialize;

use crate::error::{Result, VarzError};
use crate::protocol::op::{OpKind, Operation, OperationDescriptor, VariableName};
use crate::time::VarzTime;

/// Operation selector as written in a record.
///
/// Any JSON number is accepted here so that out-of-range codes (negative,
/// above `u8`, fractional) surface as unknown operations, not malformed JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OpCode {
    Code(serde_json::Number),
    Name(String),
}

impl OpCode {
    pub fn kind(&self) -> Result<OpKind> {
        match self {
            OpCode::Code(n) => match n.as_u64().and_then(|c| u8::try_from(c).ok()) {
                Some(c) => OpKind::try_from(c),
                None => Err(VarzError::UnknownOperation(format!("code {n}"))),
            },
            OpCode::Name(n) => n.parse(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationRecord {
    pub op: OpCode,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub time: Option<VarzTime>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub randomness: Option<[u64; 2]>,
}

impl OperationRecord {
    /// Parse one record from JSON text.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| VarzError::BadRequest(format!("invalid record json: {e}")))
    }

    /// Validate and convert into a descriptor.
    pub fn into_descriptor(self) -> Result<OperationDescriptor> {
        let kind = self.op.kind()?;
        let op_name = kind.as_str();

        let op = match kind {
            OpKind::Invalid => Operation::Invalid,
            OpKind::CounterAdd => Operation::CounterAdd {
                time: need(self.time, op_name, "time")?,
                amount: need(self.amount, op_name, "amount")?,
            },
            OpKind::SamplerAdd => Operation::SamplerAdd {
                time: need(self.time, op_name, "time")?,
                value: need(self.value, op_name, "value")?,
                randomness: need(self.randomness, op_name, "randomness")?,
            },
            OpKind::DumpAllJson => Operation::DumpAllJson,
            OpKind::ListAllJson => Operation::ListAllJson,
            OpKind::FlushAll => Operation::FlushAll,
            OpKind::CounterGet => Operation::CounterGet,
        };

        let variable_name = match (kind.needs_name(), self.name.as_deref()) {
            (true, Some(n)) => VariableName::new(n)?,
            (true, None) => return Err(VarzError::MissingField { op: op_name, field: "name" }),
            (false, _) => VariableName::default(),
        };

        OperationDescriptor::new(variable_name, op)
    }
}

fn need<T>(v: Option<T>, op: &'static str, field: &'static str) -> Result<T> {
    v.ok_or(VarzError::MissingField { op, field })
}
