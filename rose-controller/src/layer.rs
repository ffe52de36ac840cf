//! Decorator layers and the pipeline that stacks them.

use std::sync::Arc;

use async_trait::async_trait;
use rose_model::{Entity, EntityType};
use rose_types::EntityId;

use crate::controller::ModelController;
use crate::error::ControllerResult;

/// One decorator in a controller chain.
///
/// Every operation receives the controller it wraps. The default bodies
/// forward unchanged, so a layer overrides only what it adds to.
#[async_trait]
pub trait ControllerLayer: Send + Sync {
    async fn list(
        &self,
        inner: &dyn ModelController,
        entity_type: &EntityType,
    ) -> ControllerResult<Vec<Entity>> {
        inner.list(entity_type).await
    }

    async fn count(
        &self,
        inner: &dyn ModelController,
        entity_type: &EntityType,
    ) -> ControllerResult<u64> {
        inner.count(entity_type).await
    }

    async fn get_by_id(
        &self,
        inner: &dyn ModelController,
        entity_type: &EntityType,
        id: EntityId,
    ) -> ControllerResult<Entity> {
        inner.get_by_id(entity_type, id).await
    }

    async fn get_by_ids(
        &self,
        inner: &dyn ModelController,
        entity_type: &EntityType,
        ids: &[EntityId],
    ) -> ControllerResult<Vec<Entity>> {
        inner.get_by_ids(entity_type, ids).await
    }

    async fn create_new(
        &self,
        inner: &dyn ModelController,
        entity_type: &EntityType,
    ) -> ControllerResult<Entity> {
        inner.create_new(entity_type).await
    }

    async fn copy(&self, inner: &dyn ModelController, entity: &Entity) -> ControllerResult<Entity> {
        inner.copy(entity).await
    }

    async fn update(&self, inner: &dyn ModelController, entities: &[Entity]) -> ControllerResult<()> {
        inner.update(entities).await
    }

    async fn delete(&self, inner: &dyn ModelController, entity: &Entity) -> ControllerResult<()> {
        inner.delete(entity).await
    }
}

/// A layer bound to the single controller it wraps.
pub struct Layered<L> {
    layer: L,
    inner: Arc<dyn ModelController>,
}

impl<L: ControllerLayer> Layered<L> {
    pub fn new(layer: L, inner: Arc<dyn ModelController>) -> Self {
        Self { layer, inner }
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }
}

#[async_trait]
impl<L: ControllerLayer> ModelController for Layered<L> {
    async fn list(&self, entity_type: &EntityType) -> ControllerResult<Vec<Entity>> {
        self.layer.list(self.inner.as_ref(), entity_type).await
    }

    async fn count(&self, entity_type: &EntityType) -> ControllerResult<u64> {
        self.layer.count(self.inner.as_ref(), entity_type).await
    }

    async fn get_by_id(&self, entity_type: &EntityType, id: EntityId) -> ControllerResult<Entity> {
        self.layer.get_by_id(self.inner.as_ref(), entity_type, id).await
    }

    async fn get_by_ids(
        &self,
        entity_type: &EntityType,
        ids: &[EntityId],
    ) -> ControllerResult<Vec<Entity>> {
        self.layer
            .get_by_ids(self.inner.as_ref(), entity_type, ids)
            .await
    }

    async fn create_new(&self, entity_type: &EntityType) -> ControllerResult<Entity> {
        self.layer.create_new(self.inner.as_ref(), entity_type).await
    }

    async fn copy(&self, entity: &Entity) -> ControllerResult<Entity> {
        self.layer.copy(self.inner.as_ref(), entity).await
    }

    async fn update(&self, entities: &[Entity]) -> ControllerResult<()> {
        self.layer.update(self.inner.as_ref(), entities).await
    }

    async fn delete(&self, entity: &Entity) -> ControllerResult<()> {
        self.layer.delete(self.inner.as_ref(), entity).await
    }
}

/// Builds a controller chain at startup.
///
/// Layers are applied innermost first: in
/// `ControllerPipeline::new(base).layer(a).layer(b).build()` a call enters
/// `b`, then `a`, then reaches `base`.
pub struct ControllerPipeline {
    controller: Arc<dyn ModelController>,
}

impl ControllerPipeline {
    pub fn new(base: impl ModelController + 'static) -> Self {
        Self {
            controller: Arc::new(base),
        }
    }

    /// Wraps the chain built so far in `layer`.
    pub fn layer<L: ControllerLayer + 'static>(self, layer: L) -> Self {
        Self {
            controller: Arc::new(Layered::new(layer, self.controller)),
        }
    }

    pub fn build(self) -> Arc<dyn ModelController> {
        self.controller
    }
}
