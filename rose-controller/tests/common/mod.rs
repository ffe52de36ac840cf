#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rose_client::{ClientConfig, ClientError, HttpTransport, JsonCodec, Method, RoseClient};
use rose_controller::{ControllerError, ControllerResult, ModelController, RemoteController};
use rose_model::{Entity, EntityDescriptor, EntityType, Readable, TypeRegistry};
use rose_types::EntityId;
use wiremock::MockServer;

pub fn note_type() -> EntityType {
    EntityDescriptor::new("Note")
        .text("title")
        .text("body")
        .to_many("tags", "Tag")
        .build()
}

pub fn tag_type() -> EntityType {
    EntityDescriptor::new("Tag").text("label").build()
}

pub fn registry() -> Arc<TypeRegistry> {
    Arc::new(TypeRegistry::new().with(note_type()).with(tag_type()))
}

pub fn remote_for(server: &MockServer) -> RemoteController {
    let config = ClientConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    };
    let transport = HttpTransport::new(config).unwrap();
    RemoteController::new(RoseClient::new(Arc::new(transport), registry()))
}

pub fn wire(json: &str) -> String {
    JsonCodec::new().encode_body(json)
}

pub fn note(id: u32, title: &str, body: Option<&str>) -> Entity {
    let mut entity = Entity::new(note_type()).with_id(EntityId::new(id));
    entity.set_field(0, title).unwrap();
    entity.set_field(1, body).unwrap();
    entity
}

// ── In-memory base controller ───────────────────────────────────

#[derive(Default)]
struct MemState {
    next_id: u32,
    store: BTreeMap<(String, EntityId), Entity>,
    calls: Vec<&'static str>,
}

/// A base controller over a map, counting every call it receives.
#[derive(Clone, Default)]
pub struct InMemoryController {
    state: Arc<Mutex<MemState>>,
}

impl InMemoryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|c| **c == operation).count()
    }

    pub fn stored(&self) -> usize {
        self.state.lock().unwrap().store.len()
    }

    fn key(entity_type: &EntityType, id: EntityId) -> (String, EntityId) {
        (entity_type.name().to_lowercase(), id)
    }

    fn missing(entity_type: &EntityType, id: EntityId) -> ControllerError {
        ControllerError::Client(ClientError::InvalidRequest {
            method: Method::Get,
            path: format!("/entity/{}/{id}", entity_type.path_segment()),
            reason: "not found".to_string(),
        })
    }

    fn require_id(entity: &Entity) -> ControllerResult<EntityId> {
        entity.id().ok_or_else(|| ControllerError::NotPersisted {
            entity: entity.entity_type().name().to_string(),
        })
    }

    fn insert_new(state: &mut MemState, mut entity: Entity) -> Entity {
        state.next_id += 1;
        entity.set_id(Some(EntityId::new(state.next_id)));
        let key = Self::key(entity.entity_type(), EntityId::new(state.next_id));
        state.store.insert(key, entity.clone());
        entity
    }
}

#[async_trait]
impl ModelController for InMemoryController {
    async fn list(&self, entity_type: &EntityType) -> ControllerResult<Vec<Entity>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("list");
        let name = entity_type.name().to_lowercase();
        Ok(state
            .store
            .iter()
            .filter(|((n, _), _)| *n == name)
            .map(|(_, e)| e.clone())
            .collect())
    }

    async fn count(&self, entity_type: &EntityType) -> ControllerResult<u64> {
        let count = self.list(entity_type).await?.len() as u64;
        let mut state = self.state.lock().unwrap();
        state.calls.pop();
        state.calls.push("count");
        Ok(count)
    }

    async fn get_by_id(&self, entity_type: &EntityType, id: EntityId) -> ControllerResult<Entity> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("get_by_id");
        state
            .store
            .get(&Self::key(entity_type, id))
            .cloned()
            .ok_or_else(|| Self::missing(entity_type, id))
    }

    async fn get_by_ids(
        &self,
        entity_type: &EntityType,
        ids: &[EntityId],
    ) -> ControllerResult<Vec<Entity>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("get_by_ids");
        ids.iter()
            .map(|id| {
                state
                    .store
                    .get(&Self::key(entity_type, *id))
                    .cloned()
                    .ok_or_else(|| Self::missing(entity_type, *id))
            })
            .collect()
    }

    async fn create_new(&self, entity_type: &EntityType) -> ControllerResult<Entity> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("create_new");
        Ok(Self::insert_new(&mut state, Entity::new(entity_type.clone())))
    }

    async fn copy(&self, entity: &Entity) -> ControllerResult<Entity> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("copy");
        Ok(Self::insert_new(&mut state, entity.duplicate()))
    }

    async fn update(&self, entities: &[Entity]) -> ControllerResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("update");
        for entity in entities {
            let id = Self::require_id(entity)?;
            state
                .store
                .insert(Self::key(entity.entity_type(), id), entity.clone());
        }
        Ok(())
    }

    async fn delete(&self, entity: &Entity) -> ControllerResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("delete");
        let id = Self::require_id(entity)?;
        state.store.remove(&Self::key(entity.entity_type(), id));
        Ok(())
    }
}
