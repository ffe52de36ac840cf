//! Error types for flat record encoding.

use rose_types::ErrorKind;
use thiserror::Error;

/// Result type for record operations.
pub type DtoResult<T> = Result<T, DtoError>;

/// Errors raised while validating or interpreting a flat record.
#[derive(Debug, Error)]
pub enum DtoError {
    /// Key is not `type`, `id`, `timestamp` or `[ef][0-9]+`.
    #[error("unknown key '{key}'")]
    UnknownKey { key: String },

    /// A reserved key carries a value of the wrong shape.
    #[error("malformed value for '{key}': '{value}'")]
    MalformedValue { key: String, value: String },

    /// The `type` value does not resolve.
    #[error("unknown type '{name}'")]
    UnknownType { name: String },

    /// A multi-valued entry (form parameter) without exactly one element.
    #[error("array value '{key}' has {len} elements, expected exactly one")]
    AmbiguousEntry { key: String, len: usize },

    /// A JSON entry that is neither a string, number, boolean nor null.
    #[error("entry '{key}' is not a scalar value")]
    MalformedEntry { key: String },

    /// The same key appears twice in one record.
    #[error("duplicate key '{key}'")]
    DuplicateKey { key: String },

    #[error("missing key '{key}'")]
    MissingKey { key: String },

    /// A valid record that does not fit its entity type.
    #[error("cannot rebuild {entity}: {reason}")]
    Encoding { entity: String, reason: String },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DtoError {
    /// Taxonomy kind: malformed external input is a validation failure,
    /// a record that cannot be turned back into an entity is an encoding one.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DtoError::Encoding { .. } | DtoError::Json(_) => ErrorKind::Encoding,
            _ => ErrorKind::Validation,
        }
    }

    /// The record key that caused the failure, when there is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            DtoError::UnknownKey { key }
            | DtoError::MalformedValue { key, .. }
            | DtoError::AmbiguousEntry { key, .. }
            | DtoError::MalformedEntry { key }
            | DtoError::DuplicateKey { key }
            | DtoError::MissingKey { key } => Some(key),
            DtoError::UnknownType { .. } => Some("type"),
            DtoError::Encoding { .. } | DtoError::Json(_) => None,
        }
    }
}
