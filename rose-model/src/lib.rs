//! Entity model for Rose.
//!
//! Defines the typed object model the remote access layer moves around:
//! - [`EntityType`] / [`EntityDescriptor`]: a type's field and relation tables
//! - [`FieldValue`] / [`RelationValue`]: the values held in those slots
//! - [`Readable`]: index-based read access, all the record encoding needs
//! - [`Entity`]: a generic container for any declared type
//! - [`EntityDirectory`] / [`TypeRegistry`]: name to type resolution
//! - [`EntityValidator`]: optional write-time checks
//!
//! Field `i` of a type is always wire key `f<i>` and relation `i` is `e<i>`,
//! so the tables declared here fix the flat record layout.

mod directory;
mod entity;
mod error;
mod handler;
mod schema;
mod value;

pub use directory::{EntityDirectory, TypeRegistry};
pub use entity::{Entity, Readable};
pub use error::{ModelError, ModelResult};
pub use handler::{EntityValidator, RequiredFields};
pub use schema::{
    Cardinality, EntityDescriptor, EntityType, FieldDescriptor, FieldKind, RelationDescriptor,
};
pub use value::{DATE_FORMAT, FieldValue, RelationValue};
