//! Controller error types.

use rose_client::ClientError;
use rose_dto::DtoError;
use rose_model::ModelError;
use rose_types::ErrorKind;
use thiserror::Error;

/// Result type for controller operations.
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Errors surfaced by a [`ModelController`](crate::ModelController) chain.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("record error: {0}")]
    Record(#[from] DtoError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("unknown entity type: {0}")]
    UnknownType(String),

    #[error("expected a {expected} record, got {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("{entity} has not been saved yet")]
    NotPersisted { entity: String },

    #[error("{entity} rejected: {reason}")]
    Rejected { entity: String, reason: String },
}

impl ControllerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ControllerError::Client(e) => e.kind(),
            ControllerError::Record(e) => e.kind(),
            ControllerError::Model(e) => e.kind(),
            ControllerError::TypeMismatch { .. } => ErrorKind::Shape,
            ControllerError::UnknownType(_)
            | ControllerError::NotPersisted { .. }
            | ControllerError::Rejected { .. } => ErrorKind::Validation,
        }
    }
}
