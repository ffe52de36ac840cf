//! Client error types.

use rose_dto::DtoError;
use rose_types::ErrorKind;
use std::string::FromUtf8Error;
use thiserror::Error;

use crate::transport::Method;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Failures of the HTTP layer itself.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TransportError {
    /// Returns true if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            TransportError::Status { status, .. } => *status == 404,
            TransportError::Http(e) => e.status().is_some_and(|s| s.as_u16() == 404),
            TransportError::Config(_) => false,
        }
    }
}

/// Errors surfaced by [`RoseClient`](crate::RoseClient).
///
/// Every failure of an issued request carries the method and path it
/// happened on, plus the original cause as its `source()`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("error on {method}@{path}: {source}")]
    Transport {
        method: Method,
        path: String,
        #[source]
        source: TransportError,
    },

    #[error("error on {method}@{path}: {source}")]
    Record {
        method: Method,
        path: String,
        #[source]
        source: DtoError,
    },

    #[error("error on {method}@{path}: body is not valid percent-encoded UTF-8")]
    Body {
        method: Method,
        path: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("error on {method}@{path}: expected {expected} record(s), found {found}")]
    Shape {
        method: Method,
        path: String,
        expected: usize,
        found: usize,
    },

    /// The request could not be built; nothing was sent. `path` is as much
    /// of the target as was known when building stopped.
    #[error("error on {method}@{path}: {reason}")]
    InvalidRequest {
        method: Method,
        path: String,
        reason: String,
    },

    #[error("invalid client configuration: {0}")]
    Config(#[source] TransportError),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport { .. } => ErrorKind::Transport,
            ClientError::Record { source, .. } => source.kind(),
            ClientError::Body { .. }
            | ClientError::InvalidRequest { .. }
            | ClientError::Config(_) => ErrorKind::Validation,
            ClientError::Shape { .. } => ErrorKind::Shape,
        }
    }

    /// The method of the failed request.
    pub fn method(&self) -> Option<Method> {
        match self {
            ClientError::Transport { method, .. }
            | ClientError::Record { method, .. }
            | ClientError::Body { method, .. }
            | ClientError::Shape { method, .. }
            | ClientError::InvalidRequest { method, .. } => Some(*method),
            ClientError::Config(_) => None,
        }
    }

    /// The path of the failed request.
    pub fn path(&self) -> Option<&str> {
        match self {
            ClientError::Transport { path, .. }
            | ClientError::Record { path, .. }
            | ClientError::Body { path, .. }
            | ClientError::Shape { path, .. }
            | ClientError::InvalidRequest { path, .. } => Some(path),
            ClientError::Config(_) => None,
        }
    }

    /// The record key at fault, for validation failures.
    pub fn offending_key(&self) -> Option<&str> {
        match self {
            ClientError::Record { source, .. } => source.key(),
            _ => None,
        }
    }
}
