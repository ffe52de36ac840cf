//! Error types for the entity model.

use rose_types::ErrorKind;
use thiserror::Error;

use crate::schema::{Cardinality, FieldKind};

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised when entity state does not fit its declared type.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{entity} has no field {index}")]
    FieldIndex { entity: String, index: usize },

    #[error("{entity} has no relation {index}")]
    RelationIndex { entity: String, index: usize },

    #[error("{entity}.{field}: expected {expected} value, got {actual}")]
    KindMismatch {
        entity: String,
        field: String,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("{entity}.{relation} is a {expected} relation")]
    CardinalityMismatch {
        entity: String,
        relation: String,
        expected: Cardinality,
    },

    #[error("cannot parse '{text}' as {kind}")]
    Parse { kind: FieldKind, text: String },

    #[error("{entity} is not timestamped")]
    NotTimestamped { entity: String },

    #[error("invalid type declaration: {0}")]
    Schema(#[from] serde_json::Error),
}

impl ModelError {
    /// Model errors mean typed state could not be rebuilt.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Encoding
    }
}
