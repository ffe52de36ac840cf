//! Pre-save validation layer.

use std::sync::Arc;

use async_trait::async_trait;
use rose_model::{Entity, EntityValidator};
use tracing::warn;

use crate::controller::ModelController;
use crate::error::{ControllerError, ControllerResult};
use crate::layer::ControllerLayer;

/// Checks entities before they are saved.
///
/// Every entity of an `update` call is validated before any is forwarded;
/// one rejection fails the whole call.
#[derive(Clone)]
pub struct ValidatingLayer {
    validator: Arc<dyn EntityValidator>,
}

impl ValidatingLayer {
    pub fn new(validator: impl EntityValidator + 'static) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }
}

#[async_trait]
impl ControllerLayer for ValidatingLayer {
    async fn update(&self, inner: &dyn ModelController, entities: &[Entity]) -> ControllerResult<()> {
        for entity in entities {
            if let Err(reason) = self.validator.validate(entity) {
                let name = entity.entity_type().name().to_string();
                warn!("rejected {}: {}", name, reason);
                return Err(ControllerError::Rejected {
                    entity: name,
                    reason,
                });
            }
        }
        inner.update(entities).await
    }
}
