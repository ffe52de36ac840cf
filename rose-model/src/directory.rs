//! Type name resolution.

use std::collections::HashMap;

use crate::error::ModelResult;
use crate::schema::{EntityDescriptor, EntityType};

/// Resolves entity types by name and back.
pub trait EntityDirectory: Send + Sync {
    /// Looks a type up by name, ignoring ASCII case.
    fn type_by_name(&self, name: &str) -> Option<EntityType>;

    /// The record name of a type.
    fn name_by_type(&self, entity_type: &EntityType) -> String {
        entity_type.name().to_string()
    }
}

/// In-memory directory populated once at startup.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, EntityType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type, replacing any type of the same name.
    pub fn register(&mut self, entity_type: EntityType) {
        self.types
            .insert(entity_type.name().to_lowercase(), entity_type);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, entity_type: EntityType) -> Self {
        self.register(entity_type);
        self
    }

    /// Builds a registry from a JSON array of descriptors.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let descriptors: Vec<EntityDescriptor> = serde_json::from_str(json)?;
        Ok(descriptors
            .into_iter()
            .fold(Self::new(), |registry, d| registry.with(d.build())))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All registered types, in no particular order.
    pub fn types(&self) -> impl Iterator<Item = &EntityType> {
        self.types.values()
    }
}

impl EntityDirectory for TypeRegistry {
    fn type_by_name(&self, name: &str) -> Option<EntityType> {
        self.types.get(&name.to_lowercase()).cloned()
    }
}
