//! Identifier types used throughout the Rose stack.
//!
//! Ids are assigned by the server on creation. An entity that was never
//! persisted has no id at all, which the model expresses as `Option<EntityId>`
//! rather than a negative sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Server-assigned identifier of a persisted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates an entity ID from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the id widened to the signed wire representation.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0 as i64
    }

    /// Parses an entity ID from its decimal text.
    pub fn parse(s: &str) -> Result<Self, Error> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| Error::InvalidId(s.to_string()))
    }
}

impl From<u32> for EntityId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl TryFrom<i64> for EntityId {
    type Error = Error;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        u32::try_from(raw)
            .map(Self)
            .map_err(|_| Error::InvalidId(raw.to_string()))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
