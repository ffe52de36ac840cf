//! Typed flat record keys.

use std::fmt;
use std::str::FromStr;

use crate::error::DtoError;

/// A flat record key.
///
/// The derived ordering is the canonical encoding order: `type`, `id`,
/// `timestamp`, then fields and relations by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKey {
    Type,
    Id,
    Timestamp,
    /// Scalar field `f<N>`.
    Field(usize),
    /// Relation `e<N>`.
    Relation(usize),
}

impl RecordKey {
    /// True for `type`, `id` and `timestamp`.
    pub fn is_reserved(&self) -> bool {
        matches!(self, RecordKey::Type | RecordKey::Id | RecordKey::Timestamp)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Type => f.write_str("type"),
            RecordKey::Id => f.write_str("id"),
            RecordKey::Timestamp => f.write_str("timestamp"),
            RecordKey::Field(i) => write!(f, "f{i}"),
            RecordKey::Relation(i) => write!(f, "e{i}"),
        }
    }
}

impl FromStr for RecordKey {
    type Err = DtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || DtoError::UnknownKey { key: s.to_string() };
        match s {
            "type" => return Ok(RecordKey::Type),
            "id" => return Ok(RecordKey::Id),
            "timestamp" => return Ok(RecordKey::Timestamp),
            _ => {}
        }
        let (prefix, digits) = s.split_at_checked(1).ok_or_else(unknown)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unknown());
        }
        // One spelling per index: `f1`, never `f01`.
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(unknown());
        }
        let index: usize = digits.parse().map_err(|_| unknown())?;
        match prefix {
            "f" => Ok(RecordKey::Field(index)),
            "e" => Ok(RecordKey::Relation(index)),
            _ => Err(unknown()),
        }
    }
}

/// Matches `-?[0-9]*`, the shape of `id` and `timestamp` values.
pub(crate) fn is_integer_literal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    digits.bytes().all(|b| b.is_ascii_digit())
}
