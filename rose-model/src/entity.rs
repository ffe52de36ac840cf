//! Entities and read access to their state.

use rose_types::{EntityId, Timestamp};

use crate::error::{ModelError, ModelResult};
use crate::schema::{Cardinality, EntityType};
use crate::value::{FieldValue, RelationValue};

/// Read access to an entity's state by field and relation index.
///
/// This is everything the flat record encoding needs to know about an
/// entity. Implement it for hand-written model structs, or use the generic
/// [`Entity`] container.
pub trait Readable {
    /// The type name written to the record's `type` key.
    fn entity_name(&self) -> &str;

    /// The server id, `None` if the entity was never persisted.
    fn id(&self) -> Option<EntityId>;

    /// Last-modified time. Only timestamp-tracked types return `Some`.
    fn timestamp(&self) -> Option<Timestamp> {
        None
    }

    fn field_count(&self) -> usize;

    /// Value of scalar field `index`; null when out of range.
    fn field_value(&self, index: usize) -> FieldValue;

    fn relation_count(&self) -> usize;

    /// Value of relation `index`; an unset to-one when out of range.
    fn relation_value(&self, index: usize) -> RelationValue;
}

/// A generic entity of any declared [`EntityType`].
///
/// Field and relation slots are allocated from the type's tables and every
/// setter checks the slot's kind or cardinality.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    entity_type: EntityType,
    id: Option<EntityId>,
    timestamp: Option<Timestamp>,
    fields: Vec<FieldValue>,
    relations: Vec<RelationValue>,
}

impl Entity {
    /// Creates an unsaved entity with null fields and empty relations.
    pub fn new(entity_type: EntityType) -> Self {
        let fields = vec![FieldValue::Null; entity_type.field_count()];
        let relations = entity_type
            .relations
            .iter()
            .map(|r| RelationValue::empty(r.cardinality))
            .collect();
        let timestamp = entity_type.timestamped.then(Timestamp::now);
        Self {
            entity_type,
            id: None,
            timestamp,
            fields,
            relations,
        }
    }

    /// Builder-style id assignment.
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    pub fn set_id(&mut self, id: Option<EntityId>) {
        self.id = id;
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Sets the last-modified time. Fails on types that are not timestamped.
    pub fn set_timestamp(&mut self, timestamp: Timestamp) -> ModelResult<()> {
        if !self.entity_type.timestamped {
            return Err(ModelError::NotTimestamped {
                entity: self.entity_type.name().to_string(),
            });
        }
        self.timestamp = Some(timestamp);
        Ok(())
    }

    /// Forgets the last-modified time.
    pub fn clear_timestamp(&mut self) {
        self.timestamp = None;
    }

    pub fn field(&self, index: usize) -> Option<&FieldValue> {
        self.fields.get(index)
    }

    /// Looks a field up by its declared name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldValue> {
        self.entity_type
            .field_index(name)
            .and_then(|i| self.fields.get(i))
    }

    pub fn fields(&self) -> &[FieldValue] {
        &self.fields
    }

    /// Sets scalar field `index`. Null is accepted for every kind.
    pub fn set_field(&mut self, index: usize, value: impl Into<FieldValue>) -> ModelResult<()> {
        let value = value.into();
        let descriptor = self
            .entity_type
            .fields
            .get(index)
            .ok_or_else(|| ModelError::FieldIndex {
                entity: self.entity_type.name().to_string(),
                index,
            })?;
        if let Some(actual) = value.kind()
            && actual != descriptor.kind
        {
            return Err(ModelError::KindMismatch {
                entity: self.entity_type.name().to_string(),
                field: descriptor.name.clone(),
                expected: descriptor.kind,
                actual,
            });
        }
        self.fields[index] = value;
        Ok(())
    }

    pub fn relation(&self, index: usize) -> Option<&RelationValue> {
        self.relations.get(index)
    }

    pub fn relations(&self) -> &[RelationValue] {
        &self.relations
    }

    /// Points to-one relation `index` at `id` (or clears it).
    pub fn set_to_one(&mut self, index: usize, id: Option<EntityId>) -> ModelResult<()> {
        self.check_relation(index, Cardinality::ToOne)?;
        self.relations[index] = RelationValue::One(id);
        Ok(())
    }

    /// Replaces the members of to-many relation `index`.
    pub fn set_to_many(
        &mut self,
        index: usize,
        ids: impl IntoIterator<Item = EntityId>,
    ) -> ModelResult<()> {
        self.check_relation(index, Cardinality::ToMany)?;
        self.relations[index] = RelationValue::Many(ids.into_iter().collect());
        Ok(())
    }

    /// Adds one member to to-many relation `index`; already present ids are ignored.
    pub fn add_to_many(&mut self, index: usize, id: EntityId) -> ModelResult<()> {
        self.check_relation(index, Cardinality::ToMany)?;
        if let RelationValue::Many(ids) = &mut self.relations[index]
            && !ids.contains(&id)
        {
            ids.push(id);
        }
        Ok(())
    }

    /// Sets relation `index` from a value of matching cardinality.
    pub fn set_relation(&mut self, index: usize, value: RelationValue) -> ModelResult<()> {
        self.check_relation(index, value.cardinality())?;
        self.relations[index] = value;
        Ok(())
    }

    /// An unsaved copy: same type, fields and relations, no id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: None,
            timestamp: self.entity_type.timestamped.then(Timestamp::now),
            ..self.clone()
        }
    }

    fn check_relation(&self, index: usize, cardinality: Cardinality) -> ModelResult<()> {
        let descriptor = self
            .entity_type
            .relations
            .get(index)
            .ok_or_else(|| ModelError::RelationIndex {
                entity: self.entity_type.name().to_string(),
                index,
            })?;
        if descriptor.cardinality != cardinality {
            return Err(ModelError::CardinalityMismatch {
                entity: self.entity_type.name().to_string(),
                relation: descriptor.name.clone(),
                expected: descriptor.cardinality,
            });
        }
        Ok(())
    }
}

impl Readable for Entity {
    fn entity_name(&self) -> &str {
        self.entity_type.name()
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field_value(&self, index: usize) -> FieldValue {
        self.fields.get(index).cloned().unwrap_or_default()
    }

    fn relation_count(&self) -> usize {
        self.relations.len()
    }

    fn relation_value(&self, index: usize) -> RelationValue {
        self.relations
            .get(index)
            .cloned()
            .unwrap_or(RelationValue::One(None))
    }
}
