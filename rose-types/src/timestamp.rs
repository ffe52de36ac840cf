//! Last-modified timestamps for timestamp-tracked entity types.
//!
//! Travels on the wire as epoch milliseconds in decimal text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Error;

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp at the current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Creates a timestamp from epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns epoch milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Parses the decimal wire form.
    pub fn parse(s: &str) -> Result<Self, Error> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| Error::InvalidTimestamp(s.to_string()))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
