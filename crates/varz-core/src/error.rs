//! Shared error type across varz crates.

use thiserror::Error;

/// Stable error codes reported to callers feeding operation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed record or config.
    BadRequest,
    /// Operation kind outside the known set.
    UnknownOperation,
    /// Variable name exceeds the bounded length.
    NameTooLong,
    /// Variable name missing where one is required.
    EmptyName,
    /// Record lacks a field its operation kind needs.
    MissingField,
    /// Entry already present in a store.
    DuplicateEntry,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal failure (worker gone, io).
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON error lines.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnknownOperation => "UNKNOWN_OPERATION",
            ErrorCode::NameTooLong => "NAME_TOO_LONG",
            ErrorCode::EmptyName => "EMPTY_NAME",
            ErrorCode::MissingField => "MISSING_FIELD",
            ErrorCode::DuplicateEntry => "DUPLICATE_ENTRY",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, VarzError>;

/// Unified error type used by core and host.
#[derive(Debug, Error)]
pub enum VarzError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("variable name too long: {len} bytes (max {max})")]
    NameTooLong { len: usize, max: usize },
    #[error("variable name is empty")]
    EmptyName,
    #[error("missing field `{field}` for operation {op}")]
    MissingField { op: &'static str, field: &'static str },
    #[error("duplicate entry: {0}")]
    DuplicateEntry(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl VarzError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            VarzError::BadRequest(_) => ErrorCode::BadRequest,
            VarzError::UnknownOperation(_) => ErrorCode::UnknownOperation,
            VarzError::NameTooLong { .. } => ErrorCode::NameTooLong,
            VarzError::EmptyName => ErrorCode::EmptyName,
            VarzError::MissingField { .. } => ErrorCode::MissingField,
            VarzError::DuplicateEntry(_) => ErrorCode::DuplicateEntry,
            VarzError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            VarzError::Internal(_) => ErrorCode::Internal,
        }
    }
}
