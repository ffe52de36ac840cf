//! Entity cache layer.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rose_model::{Entity, EntityType, Readable};
use rose_types::EntityId;
use tokio::sync::RwLock;
use tracing::debug;

use crate::controller::ModelController;
use crate::error::ControllerResult;
use crate::layer::ControllerLayer;

type CacheKey = (String, EntityId);

/// Caches entities by type and id.
///
/// Reads are answered from the cache when every requested entity is
/// present; writes refresh or invalidate the affected entries after the
/// inner controller succeeds. Clones share the cache.
#[derive(Clone, Default)]
pub struct CachingLayer {
    entries: Arc<RwLock<HashMap<CacheKey, Entity>>>,
}

impl CachingLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn contains(&self, entity_type: &EntityType, id: EntityId) -> bool {
        self.entries
            .read()
            .await
            .contains_key(&key(entity_type, id))
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    async fn store(&self, entities: &[Entity]) {
        let mut entries = self.entries.write().await;
        for entity in entities {
            if let Some(id) = entity.id() {
                entries.insert(key(entity.entity_type(), id), entity.clone());
            }
        }
    }
}

fn key(entity_type: &EntityType, id: EntityId) -> CacheKey {
    (entity_type.name().to_lowercase(), id)
}

#[async_trait]
impl ControllerLayer for CachingLayer {
    async fn list(
        &self,
        inner: &dyn ModelController,
        entity_type: &EntityType,
    ) -> ControllerResult<Vec<Entity>> {
        let entities = inner.list(entity_type).await?;
        self.store(&entities).await;
        Ok(entities)
    }

    async fn get_by_id(
        &self,
        inner: &dyn ModelController,
        entity_type: &EntityType,
        id: EntityId,
    ) -> ControllerResult<Entity> {
        if let Some(hit) = self.entries.read().await.get(&key(entity_type, id)) {
            debug!("cache hit for {}#{}", entity_type, id);
            return Ok(hit.clone());
        }
        let entity = inner.get_by_id(entity_type, id).await?;
        self.store(std::slice::from_ref(&entity)).await;
        Ok(entity)
    }

    async fn get_by_ids(
        &self,
        inner: &dyn ModelController,
        entity_type: &EntityType,
        ids: &[EntityId],
    ) -> ControllerResult<Vec<Entity>> {
        {
            let entries = self.entries.read().await;
            let hits: Option<Vec<Entity>> = ids
                .iter()
                .map(|id| entries.get(&key(entity_type, *id)).cloned())
                .collect();
            if let Some(hits) = hits {
                debug!("cache hit for {} {} entities", hits.len(), entity_type);
                return Ok(hits);
            }
        }
        let entities = inner.get_by_ids(entity_type, ids).await?;
        self.store(&entities).await;
        Ok(entities)
    }

    async fn create_new(
        &self,
        inner: &dyn ModelController,
        entity_type: &EntityType,
    ) -> ControllerResult<Entity> {
        let entity = inner.create_new(entity_type).await?;
        self.store(std::slice::from_ref(&entity)).await;
        Ok(entity)
    }

    async fn update(&self, inner: &dyn ModelController, entities: &[Entity]) -> ControllerResult<()> {
        let result = inner.update(entities).await;
        if result.is_ok() {
            self.store(entities).await;
        } else {
            // A partial update leaves the stored state unknown.
            let mut cached = self.entries.write().await;
            for entity in entities {
                if let Some(id) = entity.id() {
                    cached.remove(&key(entity.entity_type(), id));
                }
            }
        }
        result
    }

    async fn delete(&self, inner: &dyn ModelController, entity: &Entity) -> ControllerResult<()> {
        inner.delete(entity).await?;
        if let Some(id) = entity.id() {
            self.entries
                .write()
                .await
                .remove(&key(entity.entity_type(), id));
        }
        Ok(())
    }
}
