//! Flat record encoding for Rose entities.
//!
//! Any [`Readable`](rose_model::Readable) entity, whatever its type or
//! relation shape, maps onto one uniform string key/value record:
//!
//! | key | value |
//! |---|---|
//! | `type` | entity type name |
//! | `id` | server id, omitted for unsaved entities |
//! | `timestamp` | epoch millis, only for timestamp-tracked types |
//! | `f<N>` | scalar field `N`, omitted when null |
//! | `e<N>` | relation `N`: a JSON id array (to-many) or a single id (to-one) |
//!
//! Encoding is total. Decoding external input validates every entry first
//! and never returns a partially accepted record.
//!
//! # Example
//!
//! ```
//! use rose_dto::FlatRecord;
//! use rose_model::{Entity, EntityDescriptor, TypeRegistry};
//! use rose_types::EntityId;
//!
//! let book = EntityDescriptor::new("Book").text("title").to_many("tags", "Tag").build();
//! let registry = TypeRegistry::new().with(book.clone());
//!
//! let mut entity = Entity::new(book.clone()).with_id(EntityId::new(7));
//! entity.set_field(0, "Dune").unwrap();
//! entity.set_to_many(0, [EntityId::new(3), EntityId::new(1)]).unwrap();
//!
//! let record = FlatRecord::encode(&entity);
//! assert_eq!(record.to_string(), "{type=Book, id=7, f0=Dune, e0=[1,3]}");
//!
//! let json = serde_json::to_string(&record).unwrap();
//! let raw = serde_json::from_str(&json).unwrap();
//! let decoded = FlatRecord::decode(raw, &registry).unwrap();
//! assert_eq!(decoded.to_many_ids(0).unwrap(), vec![1, 3]);
//!
//! let rebuilt = decoded.into_entity(&book).unwrap();
//! assert_eq!(rebuilt.field(0), entity.field(0));
//! ```

mod error;
mod key;
mod raw;
mod record;

pub use error::{DtoError, DtoResult};
pub use key::RecordKey;
pub use raw::RawRecord;
pub use record::FlatRecord;
