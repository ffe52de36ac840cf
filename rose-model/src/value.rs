//! Scalar and relation values held by entities.

use chrono::NaiveDate;
use rose_types::EntityId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::schema::{Cardinality, FieldKind};

/// `chrono` pattern for date fields on the wire (`dd.MM.yyyy`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// The value of one scalar field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    #[default]
    Null,
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDate),
}

impl FieldValue {
    /// The kind of this value, `None` for null.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldValue::Null => None,
            FieldValue::Text(_) => Some(FieldKind::Text),
            FieldValue::Integer(_) => Some(FieldKind::Integer),
            FieldValue::Decimal(_) => Some(FieldKind::Decimal),
            FieldValue::Boolean(_) => Some(FieldKind::Boolean),
            FieldValue::Date(_) => Some(FieldKind::Date),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Formats the value for a flat record. Null has no wire form.
    pub fn to_wire(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Decimal(d) => Some(d.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Date(d) => Some(d.format(DATE_FORMAT).to_string()),
        }
    }

    /// Parses the wire form of a field of the given kind.
    pub fn parse(kind: FieldKind, text: &str) -> ModelResult<Self> {
        let fail = || ModelError::Parse {
            kind,
            text: text.to_string(),
        };
        let value = match kind {
            FieldKind::Text => FieldValue::Text(text.to_string()),
            FieldKind::Integer => FieldValue::Integer(text.trim().parse().map_err(|_| fail())?),
            FieldKind::Decimal => FieldValue::Decimal(text.trim().parse().map_err(|_| fail())?),
            FieldKind::Boolean => match text.trim() {
                "true" => FieldValue::Boolean(true),
                "false" => FieldValue::Boolean(false),
                _ => return Err(fail()),
            },
            FieldKind::Date => FieldValue::Date(
                NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| fail())?,
            ),
        };
        Ok(value)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<Decimal> for FieldValue {
    fn from(d: Decimal) -> Self {
        FieldValue::Decimal(d)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

/// The ids referenced by one relation slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationValue {
    /// A to-one relation; `None` when unset.
    One(Option<EntityId>),
    /// A to-many relation, in insertion order.
    Many(Vec<EntityId>),
}

impl RelationValue {
    /// An unset value of the given cardinality.
    pub fn empty(cardinality: Cardinality) -> Self {
        match cardinality {
            Cardinality::ToOne => RelationValue::One(None),
            Cardinality::ToMany => RelationValue::Many(Vec::new()),
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            RelationValue::One(_) => Cardinality::ToOne,
            RelationValue::Many(_) => Cardinality::ToMany,
        }
    }

    /// The referenced ids sorted ascending, duplicates removed.
    pub fn sorted_ids(&self) -> Vec<EntityId> {
        let mut ids = match self {
            RelationValue::One(id) => id.iter().copied().collect(),
            RelationValue::Many(ids) => ids.clone(),
        };
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
