//! Mutation logging and the in-memory audit journal.

use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rose_model::{Entity, EntityType, Readable};
use rose_types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::controller::ModelController;
use crate::error::ControllerResult;
use crate::layer::ControllerLayer;

/// The mutating operations an [`AuditLayer`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Copy,
    Update,
    Delete,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuditAction::Create => "create",
            AuditAction::Copy => "copy",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// One journal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: Timestamp,
    pub action: AuditAction,
    pub entity: String,
    /// `None` when the entity never received an id.
    pub id: Option<EntityId>,
    pub succeeded: bool,
}

/// Logs every mutation and keeps an in-memory journal of them.
///
/// Results and errors of the inner controller pass through unchanged.
/// Clones share the journal.
#[derive(Clone, Default)]
pub struct AuditLayer {
    journal: Arc<Mutex<Vec<AuditEntry>>>,
}

impl AuditLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the journal, oldest first.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.journal
            .lock()
            .map(|journal| journal.clone())
            .unwrap_or_default()
    }

    fn record(&self, action: AuditAction, entity: &str, id: Option<EntityId>, succeeded: bool) {
        if succeeded {
            info!("{} {} {}", action, entity, display_id(id));
        } else {
            warn!("{} {} {} failed", action, entity, display_id(id));
        }
        if let Ok(mut journal) = self.journal.lock() {
            journal.push(AuditEntry {
                at: Timestamp::now(),
                action,
                entity: entity.to_string(),
                id,
                succeeded,
            });
        }
    }
}

fn display_id(id: Option<EntityId>) -> String {
    id.map_or_else(|| "(unsaved)".to_string(), |id| format!("#{id}"))
}

#[async_trait]
impl ControllerLayer for AuditLayer {
    async fn create_new(
        &self,
        inner: &dyn ModelController,
        entity_type: &EntityType,
    ) -> ControllerResult<Entity> {
        let result = inner.create_new(entity_type).await;
        let id = result.as_ref().ok().and_then(Readable::id);
        self.record(AuditAction::Create, entity_type.name(), id, result.is_ok());
        result
    }

    async fn copy(&self, inner: &dyn ModelController, entity: &Entity) -> ControllerResult<Entity> {
        let result = inner.copy(entity).await;
        let id = result.as_ref().ok().and_then(Readable::id);
        self.record(
            AuditAction::Copy,
            entity.entity_type().name(),
            id,
            result.is_ok(),
        );
        result
    }

    async fn update(&self, inner: &dyn ModelController, entities: &[Entity]) -> ControllerResult<()> {
        let result = inner.update(entities).await;
        for entity in entities {
            self.record(
                AuditAction::Update,
                entity.entity_type().name(),
                entity.id(),
                result.is_ok(),
            );
        }
        result
    }

    async fn delete(&self, inner: &dyn ModelController, entity: &Entity) -> ControllerResult<()> {
        let result = inner.delete(entity).await;
        self.record(
            AuditAction::Delete,
            entity.entity_type().name(),
            entity.id(),
            result.is_ok(),
        );
        result
    }
}
