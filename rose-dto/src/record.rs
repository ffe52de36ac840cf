//! The flat record: validated wire form of one entity.

use rose_model::{
    Cardinality, Entity, EntityDirectory, EntityType, FieldValue, Readable, RelationValue,
};
use rose_types::{EntityId, Timestamp};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fmt;

use crate::error::{DtoError, DtoResult};
use crate::key::{RecordKey, is_integer_literal};
use crate::raw::RawRecord;

/// The flat, string-valued wire form of one entity.
///
/// Keys are unique and keep their insertion order. Records built with
/// [`encode`](Self::encode) are valid by construction; records built from
/// external input go through [`decode`](Self::decode) or
/// [`from_form_params`](Self::from_form_params), which validate every entry
/// before anything is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRecord {
    entries: Vec<(RecordKey, String)>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes an entity. Never fails.
    ///
    /// Unsaved entities carry no `id`, null fields and unset to-one
    /// relations are left out, and to-many ids are written sorted ascending.
    pub fn encode<R: Readable + ?Sized>(entity: &R) -> Self {
        let mut record = Self::new();
        record.insert(RecordKey::Type, entity.entity_name());
        if let Some(id) = entity.id() {
            record.insert(RecordKey::Id, id.to_string());
        }
        if let Some(timestamp) = entity.timestamp() {
            record.insert(RecordKey::Timestamp, timestamp.to_string());
        }
        for index in 0..entity.field_count() {
            if let Some(text) = entity.field_value(index).to_wire() {
                record.insert(RecordKey::Field(index), text);
            }
        }
        for index in 0..entity.relation_count() {
            match entity.relation_value(index) {
                many @ RelationValue::Many(_) => {
                    let ids: Vec<String> =
                        many.sorted_ids().iter().map(ToString::to_string).collect();
                    record.insert(RecordKey::Relation(index), format!("[{}]", ids.join(",")));
                }
                RelationValue::One(Some(id)) => {
                    record.insert(RecordKey::Relation(index), id.to_string());
                }
                RelationValue::One(None) => {}
            }
        }
        record
    }

    /// Validates a JSON record received from the wire.
    ///
    /// Strings are taken verbatim, numbers and booleans by their JSON text.
    /// `null` on a field or relation means the key is absent; `type`, `id`
    /// and `timestamp` must carry a value.
    pub fn decode(raw: RawRecord, directory: &dyn EntityDirectory) -> DtoResult<Self> {
        let mut record = Self::new();
        for (key, value) in raw {
            let parsed: RecordKey = key.parse()?;
            let text = match value {
                Value::Null if parsed.is_reserved() => {
                    return Err(DtoError::MalformedValue {
                        key,
                        value: "null".to_string(),
                    });
                }
                Value::Null => {
                    record.check_unique(parsed)?;
                    continue;
                }
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(DtoError::MalformedEntry { key });
                }
            };
            check_entry(parsed, &key, &text, directory)?;
            record.push_unique(parsed, text)?;
        }
        Ok(record)
    }

    /// Validates multi-valued parameters such as an HTTP form submission.
    ///
    /// Every key must carry exactly one value.
    pub fn from_form_params<I, K>(params: I, directory: &dyn EntityDirectory) -> DtoResult<Self>
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: Into<String>,
    {
        let mut record = Self::new();
        for (key, mut values) in params {
            let key = key.into();
            let parsed: RecordKey = key.parse()?;
            if values.len() != 1 {
                return Err(DtoError::AmbiguousEntry {
                    len: values.len(),
                    key,
                });
            }
            let text = values.remove(0);
            check_entry(parsed, &key, &text, directory)?;
            record.push_unique(parsed, text)?;
        }
        Ok(record)
    }

    /// Inserts or replaces an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, key: RecordKey, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    fn check_unique(&self, key: RecordKey) -> DtoResult<()> {
        if self.contains_key(key) {
            return Err(DtoError::DuplicateKey {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    fn push_unique(&mut self, key: RecordKey, value: String) -> DtoResult<()> {
        self.check_unique(key)?;
        self.entries.push((key, value));
        Ok(())
    }

    pub fn remove(&mut self, key: RecordKey) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, key: RecordKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: RecordKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    // ── Typed accessors ──────────────────────────────────────────

    /// The raw `type` value.
    pub fn type_name(&self) -> Option<&str> {
        self.get(RecordKey::Type)
    }

    /// Resolves `type` through the directory; `None` if absent or unknown.
    pub fn resolve_type(&self, directory: &dyn EntityDirectory) -> Option<EntityType> {
        self.type_name().and_then(|name| directory.type_by_name(name))
    }

    /// The `id` value. Negative values mean "not persisted".
    pub fn id(&self) -> DtoResult<i64> {
        let text = self.get(RecordKey::Id).ok_or_else(|| DtoError::MissingKey {
            key: RecordKey::Id.to_string(),
        })?;
        parse_integer(RecordKey::Id, text)
    }

    pub fn has_timestamp(&self) -> bool {
        self.contains_key(RecordKey::Timestamp)
    }

    pub fn timestamp(&self) -> DtoResult<Timestamp> {
        let text = self
            .get(RecordKey::Timestamp)
            .ok_or_else(|| DtoError::MissingKey {
                key: RecordKey::Timestamp.to_string(),
            })?;
        parse_integer(RecordKey::Timestamp, text).map(Timestamp::from_millis)
    }

    /// The text of scalar field `index`; `None` when the field is null.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.get(RecordKey::Field(index))
    }

    /// The id referenced by to-one relation `index`; `None` when unset.
    pub fn to_one_id(&self, index: usize) -> DtoResult<Option<i64>> {
        let key = RecordKey::Relation(index);
        self.get(key)
            .map(|text| parse_integer(key, text))
            .transpose()
    }

    /// The ids of to-many relation `index`, in the order they were sent.
    pub fn to_many_ids(&self, index: usize) -> DtoResult<Vec<i64>> {
        let key = RecordKey::Relation(index);
        let Some(text) = self.get(key) else {
            return Ok(Vec::new());
        };
        serde_json::from_str(text).map_err(|_| DtoError::MalformedValue {
            key: key.to_string(),
            value: text.to_string(),
        })
    }

    /// Rebuilds a typed entity of `entity_type` from this record.
    ///
    /// Fails with [`DtoError::Encoding`] when the record names another type,
    /// addresses a slot the type does not declare, or holds a value that
    /// does not parse as the slot's kind.
    pub fn into_entity(&self, entity_type: &EntityType) -> DtoResult<Entity> {
        let entity_name = entity_type.name().to_string();
        let fail = |reason: String| DtoError::Encoding {
            entity: entity_name.clone(),
            reason,
        };

        match self.type_name() {
            Some(name) if name.eq_ignore_ascii_case(entity_type.name()) => {}
            Some(name) => return Err(fail(format!("record has type '{name}'"))),
            None => {
                return Err(DtoError::MissingKey {
                    key: RecordKey::Type.to_string(),
                });
            }
        }

        let mut entity = Entity::new(entity_type.clone());
        entity.clear_timestamp();
        for (key, text) in self.iter() {
            match key {
                RecordKey::Type => {}
                RecordKey::Id => {
                    let raw = parse_integer(key, text)?;
                    if raw >= 0 {
                        let id = EntityId::try_from(raw).map_err(|e| fail(e.to_string()))?;
                        entity.set_id(Some(id));
                    }
                }
                RecordKey::Timestamp => {
                    let millis = parse_integer(key, text)?;
                    entity
                        .set_timestamp(Timestamp::from_millis(millis))
                        .map_err(|e| fail(e.to_string()))?;
                }
                RecordKey::Field(index) => {
                    let descriptor = entity_type
                        .fields
                        .get(index)
                        .ok_or_else(|| fail(format!("no field {index}")))?;
                    let value =
                        FieldValue::parse(descriptor.kind, text).map_err(|e| fail(e.to_string()))?;
                    entity
                        .set_field(index, value)
                        .map_err(|e| fail(e.to_string()))?;
                }
                RecordKey::Relation(index) => {
                    let descriptor = entity_type
                        .relations
                        .get(index)
                        .ok_or_else(|| fail(format!("no relation {index}")))?;
                    let value = match descriptor.cardinality {
                        Cardinality::ToOne => {
                            let raw = parse_integer(key, text)?;
                            RelationValue::One(Some(to_entity_id(raw).map_err(&fail)?))
                        }
                        Cardinality::ToMany => {
                            let ids = self
                                .to_many_ids(index)?
                                .into_iter()
                                .map(to_entity_id)
                                .collect::<Result<Vec<_>, _>>()
                                .map_err(&fail)?;
                            RelationValue::Many(ids)
                        }
                    };
                    entity
                        .set_relation(index, value)
                        .map_err(|e| fail(e.to_string()))?;
                }
            }
        }
        Ok(entity)
    }
}

impl Serialize for FlatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

impl fmt::Display for FlatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

/// Checks the value of one incoming entry against its key.
fn check_entry(
    parsed: RecordKey,
    key: &str,
    value: &str,
    directory: &dyn EntityDirectory,
) -> DtoResult<()> {
    match parsed {
        RecordKey::Id | RecordKey::Timestamp if !is_integer_literal(value) => {
            Err(DtoError::MalformedValue {
                key: key.to_string(),
                value: value.to_string(),
            })
        }
        RecordKey::Type if directory.type_by_name(value).is_none() => Err(DtoError::UnknownType {
            name: value.to_string(),
        }),
        _ => Ok(()),
    }
}

fn parse_integer(key: RecordKey, text: &str) -> DtoResult<i64> {
    text.trim()
        .parse()
        .map_err(|_| DtoError::MalformedValue {
            key: key.to_string(),
            value: text.to_string(),
        })
}

fn to_entity_id(raw: i64) -> Result<EntityId, String> {
    EntityId::try_from(raw).map_err(|e| e.to_string())
}
