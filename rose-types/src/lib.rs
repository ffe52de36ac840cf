//! Core type definitions for Rose.
//!
//! This crate defines the small, model-agnostic types shared by every layer
//! of the remote entity access stack:
//! - Entity identifiers as assigned by the server
//! - Last-modified timestamps (epoch milliseconds)
//! - The error taxonomy used to classify failures across crates
//!
//! Entity types, records and the REST client live in their own crates.

mod ids;
mod timestamp;

pub use ids::EntityId;
pub use timestamp::Timestamp;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid entity id: {0}")]
    InvalidId(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Classification shared by every Rose error type.
///
/// Each crate keeps its own error enum, but all of them can be mapped onto
/// one of these kinds so callers can react uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A well-formed entity could not be turned back into a typed value.
    Encoding,
    /// External input carried an unknown key or a malformed value.
    Validation,
    /// The network or HTTP layer failed.
    Transport,
    /// A response had the wrong cardinality.
    Shape,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Encoding => "encoding",
            ErrorKind::Validation => "validation",
            ErrorKind::Transport => "transport",
            ErrorKind::Shape => "shape",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Returns the taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidId(_) | Error::InvalidTimestamp(_) => ErrorKind::Validation,
        }
    }
}
