use crate::Entity;

/// Hook for rejecting entities before they are written.
///
/// Implemented for plain closures, so most callers never name a type:
///
/// ```
/// use rose_model::{Entity, EntityValidator};
///
/// let non_empty = |entity: &Entity| {
///     if entity.fields().iter().all(|f| f.is_null()) {
///         Err("entity has no data".to_string())
///     } else {
///         Ok(())
///     }
/// };
/// fn accepts(_: &dyn EntityValidator) {}
/// accepts(&non_empty);
/// ```
pub trait EntityValidator: Send + Sync {
    /// Return `Err(message)` to reject the write.
    fn validate(&self, entity: &Entity) -> Result<(), String> {
        let _ = entity;
        Ok(())
    }
}

impl<F> EntityValidator for F
where
    F: Fn(&Entity) -> Result<(), String> + Send + Sync,
{
    fn validate(&self, entity: &Entity) -> Result<(), String> {
        self(entity)
    }
}

/// Rejects entities whose listed fields are null.
#[derive(Debug, Clone)]
pub struct RequiredFields {
    entity: String,
    fields: Vec<usize>,
}

impl RequiredFields {
    /// Requires `fields` (by index) on entities of type `entity`.
    pub fn new(entity: &str, fields: impl IntoIterator<Item = usize>) -> Self {
        Self {
            entity: entity.to_string(),
            fields: fields.into_iter().collect(),
        }
    }
}

impl EntityValidator for RequiredFields {
    fn validate(&self, entity: &Entity) -> Result<(), String> {
        if !entity.entity_type().name().eq_ignore_ascii_case(&self.entity) {
            return Ok(());
        }
        for &index in &self.fields {
            if entity.field(index).is_none_or(|v| v.is_null()) {
                let name = entity
                    .entity_type()
                    .fields
                    .get(index)
                    .map_or_else(|| format!("f{index}"), |f| f.name.clone());
                return Err(format!("{}.{} is required", self.entity, name));
            }
        }
        Ok(())
    }
}
