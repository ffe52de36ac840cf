//! The controller contract and its remote implementation.

use std::sync::Arc;

use async_trait::async_trait;
use rose_client::RoseClient;
use rose_dto::FlatRecord;
use rose_model::{Entity, EntityType, Readable};
use rose_types::EntityId;
use tracing::debug;

use crate::error::{ControllerError, ControllerResult};

/// Typed entity access: the operations an application calls.
///
/// Implementations are either a base controller that talks to storage or a
/// layer wrapping exactly one inner controller (see
/// [`ControllerPipeline`](crate::ControllerPipeline)).
#[async_trait]
pub trait ModelController: Send + Sync {
    /// Every stored entity of a type.
    async fn list(&self, entity_type: &EntityType) -> ControllerResult<Vec<Entity>>;

    async fn count(&self, entity_type: &EntityType) -> ControllerResult<u64>;

    async fn get_by_id(&self, entity_type: &EntityType, id: EntityId) -> ControllerResult<Entity>;

    async fn get_by_ids(
        &self,
        entity_type: &EntityType,
        ids: &[EntityId],
    ) -> ControllerResult<Vec<Entity>>;

    /// Creates and stores a blank entity, returned with its assigned id.
    async fn create_new(&self, entity_type: &EntityType) -> ControllerResult<Entity>;

    /// Stores a new entity holding the same fields and relations as `entity`.
    async fn copy(&self, entity: &Entity) -> ControllerResult<Entity>;

    /// Saves entities in order, stopping at the first failure.
    async fn update(&self, entities: &[Entity]) -> ControllerResult<()>;

    async fn delete(&self, entity: &Entity) -> ControllerResult<()>;
}

#[async_trait]
impl<C: ModelController + ?Sized> ModelController for Arc<C> {
    async fn list(&self, entity_type: &EntityType) -> ControllerResult<Vec<Entity>> {
        (**self).list(entity_type).await
    }

    async fn count(&self, entity_type: &EntityType) -> ControllerResult<u64> {
        (**self).count(entity_type).await
    }

    async fn get_by_id(&self, entity_type: &EntityType, id: EntityId) -> ControllerResult<Entity> {
        (**self).get_by_id(entity_type, id).await
    }

    async fn get_by_ids(
        &self,
        entity_type: &EntityType,
        ids: &[EntityId],
    ) -> ControllerResult<Vec<Entity>> {
        (**self).get_by_ids(entity_type, ids).await
    }

    async fn create_new(&self, entity_type: &EntityType) -> ControllerResult<Entity> {
        (**self).create_new(entity_type).await
    }

    async fn copy(&self, entity: &Entity) -> ControllerResult<Entity> {
        (**self).copy(entity).await
    }

    async fn update(&self, entities: &[Entity]) -> ControllerResult<()> {
        (**self).update(entities).await
    }

    async fn delete(&self, entity: &Entity) -> ControllerResult<()> {
        (**self).delete(entity).await
    }
}

/// Base controller backed by the REST client.
#[derive(Clone)]
pub struct RemoteController {
    client: RoseClient,
}

impl RemoteController {
    pub fn new(client: RoseClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RoseClient {
        &self.client
    }

    /// Path segment of a type the client's directory knows about.
    fn segment(&self, entity_type: &EntityType) -> ControllerResult<String> {
        match self.client.directory().type_by_name(entity_type.name()) {
            Some(known) if known == *entity_type => Ok(entity_type.path_segment()),
            _ => Err(ControllerError::UnknownType(entity_type.name().to_string())),
        }
    }

    fn to_entity(entity_type: &EntityType, record: &FlatRecord) -> ControllerResult<Entity> {
        match record.type_name() {
            Some(name) if name.eq_ignore_ascii_case(entity_type.name()) => {
                Ok(record.into_entity(entity_type)?)
            }
            found => Err(ControllerError::TypeMismatch {
                expected: entity_type.name().to_string(),
                found: found.unwrap_or_default().to_string(),
            }),
        }
    }

    fn to_entities(
        entity_type: &EntityType,
        records: &[FlatRecord],
    ) -> ControllerResult<Vec<Entity>> {
        records
            .iter()
            .map(|record| Self::to_entity(entity_type, record))
            .collect()
    }

    fn require_id(entity: &Entity) -> ControllerResult<EntityId> {
        entity.id().ok_or_else(|| ControllerError::NotPersisted {
            entity: entity.entity_type().name().to_string(),
        })
    }
}

#[async_trait]
impl ModelController for RemoteController {
    async fn list(&self, entity_type: &EntityType) -> ControllerResult<Vec<Entity>> {
        let segment = self.segment(entity_type)?;
        let ids = self.client.get_ids(&segment).await?;
        debug!("listing {} {} entities", ids.len(), entity_type);
        let records = self.client.get_records(&segment, &ids).await?;
        Self::to_entities(entity_type, &records)
    }

    async fn count(&self, entity_type: &EntityType) -> ControllerResult<u64> {
        let segment = self.segment(entity_type)?;
        Ok(self.client.get_count(&segment).await?)
    }

    async fn get_by_id(&self, entity_type: &EntityType, id: EntityId) -> ControllerResult<Entity> {
        let segment = self.segment(entity_type)?;
        let record = self.client.get_record(&segment, id).await?;
        Self::to_entity(entity_type, &record)
    }

    async fn get_by_ids(
        &self,
        entity_type: &EntityType,
        ids: &[EntityId],
    ) -> ControllerResult<Vec<Entity>> {
        let segment = self.segment(entity_type)?;
        let records = self.client.get_records(&segment, ids).await?;
        Self::to_entities(entity_type, &records)
    }

    async fn create_new(&self, entity_type: &EntityType) -> ControllerResult<Entity> {
        self.segment(entity_type)?;
        let blank = Entity::new(entity_type.clone());
        let stored = self.client.post_record(&FlatRecord::encode(&blank)).await?;
        let entity = Self::to_entity(entity_type, &stored)?;
        if !entity.is_persisted() {
            return Err(ControllerError::NotPersisted {
                entity: entity_type.name().to_string(),
            });
        }
        Ok(entity)
    }

    async fn copy(&self, entity: &Entity) -> ControllerResult<Entity> {
        let mut copy = self.create_new(entity.entity_type()).await?;
        for (index, value) in entity.fields().iter().enumerate() {
            copy.set_field(index, value.clone())?;
        }
        for (index, value) in entity.relations().iter().enumerate() {
            copy.set_relation(index, value.clone())?;
        }
        self.client.put_record(&FlatRecord::encode(&copy)).await?;
        Ok(copy)
    }

    async fn update(&self, entities: &[Entity]) -> ControllerResult<()> {
        for entity in entities {
            Self::require_id(entity)?;
            self.segment(entity.entity_type())?;
            self.client.put_record(&FlatRecord::encode(entity)).await?;
        }
        Ok(())
    }

    async fn delete(&self, entity: &Entity) -> ControllerResult<()> {
        let id = Self::require_id(entity)?;
        let segment = self.segment(entity.entity_type())?;
        self.client.delete_by_id(&segment, id).await?;
        Ok(())
    }
}
