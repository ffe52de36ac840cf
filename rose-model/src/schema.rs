//! Entity type declarations: ordered field and relation tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Declares an entity type's scalar field table and relation table.
///
/// The position of a field or relation in its table is its wire index:
/// field `i` travels as `f<i>`, relation `i` as `e<i>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub relations: Vec<RelationDescriptor>,
    /// Whether entities of this type carry a last-modified timestamp.
    #[serde(default)]
    pub timestamped: bool,
}

impl EntityDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            relations: Vec::new(),
            timestamped: false,
        }
    }

    /// Appends a scalar field.
    pub fn field(mut self, name: &str, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            kind,
        });
        self
    }

    /// Shorthand for a text field.
    pub fn text(self, name: &str) -> Self {
        self.field(name, FieldKind::Text)
    }

    /// Shorthand for an integer field.
    pub fn integer(self, name: &str) -> Self {
        self.field(name, FieldKind::Integer)
    }

    /// Shorthand for a decimal field.
    pub fn decimal(self, name: &str) -> Self {
        self.field(name, FieldKind::Decimal)
    }

    /// Shorthand for a boolean field.
    pub fn boolean(self, name: &str) -> Self {
        self.field(name, FieldKind::Boolean)
    }

    /// Shorthand for a date field.
    pub fn date(self, name: &str) -> Self {
        self.field(name, FieldKind::Date)
    }

    /// Appends a to-one relation to `target`.
    pub fn to_one(mut self, name: &str, target: &str) -> Self {
        self.relations.push(RelationDescriptor {
            name: name.into(),
            target: target.into(),
            cardinality: Cardinality::ToOne,
        });
        self
    }

    /// Appends a to-many relation to `target`.
    pub fn to_many(mut self, name: &str, target: &str) -> Self {
        self.relations.push(RelationDescriptor {
            name: name.into(),
            target: target.into(),
            cardinality: Cardinality::ToMany,
        });
        self
    }

    /// Marks the type as timestamp-tracked.
    pub fn timestamped(mut self) -> Self {
        self.timestamped = true;
        self
    }

    /// Freezes the descriptor into a shareable [`EntityType`].
    pub fn build(self) -> EntityType {
        EntityType(Arc::new(self))
    }

    /// Index of the field called `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Index of the relation called `name`.
    pub fn relation_index(&self, name: &str) -> Option<usize> {
        self.relations.iter().position(|r| r.name == name)
    }
}

/// A scalar field slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

/// A relation slot pointing at another entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    pub name: String,
    /// Name of the related entity type.
    pub target: String,
    pub cardinality: Cardinality,
}

/// The data type of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Boolean,
    /// Calendar date, `dd.MM.yyyy` on the wire.
    Date,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
        };
        f.write_str(name)
    }
}

/// Whether a relation holds at most one entity or a set of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    ToOne,
    ToMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::ToOne => f.write_str("to-one"),
            Cardinality::ToMany => f.write_str("to-many"),
        }
    }
}

/// Shared handle to a frozen [`EntityDescriptor`].
///
/// Two handles are equal when they name the same type (case-insensitively).
#[derive(Debug, Clone)]
pub struct EntityType(Arc<EntityDescriptor>);

impl EntityType {
    /// The type name as written in records (e.g. `Book`).
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The REST path segment for this type (e.g. `book`).
    pub fn path_segment(&self) -> String {
        self.0.name.to_lowercase()
    }

    pub fn field_count(&self) -> usize {
        self.0.fields.len()
    }

    pub fn relation_count(&self) -> usize {
        self.0.relations.len()
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.0
    }
}

impl Deref for EntityType {
    type Target = EntityDescriptor;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name.eq_ignore_ascii_case(&other.0.name)
    }
}

impl Eq for EntityType {}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}
