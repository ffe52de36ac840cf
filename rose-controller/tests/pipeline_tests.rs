mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rose_controller::{
    ControllerError, ControllerLayer, ControllerPipeline, ControllerResult, Layered,
    ModelController,
};
use rose_model::{Entity, EntityType, Readable};
use rose_types::EntityId;

use common::{InMemoryController, note, note_type};

/// Overrides nothing.
struct Passthrough;

impl ControllerLayer for Passthrough {}

/// Records its name whenever a read passes through.
struct Marker {
    name: &'static str,
    seen: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl ControllerLayer for Marker {
    async fn get_by_id(
        &self,
        inner: &dyn ModelController,
        entity_type: &EntityType,
        id: EntityId,
    ) -> ControllerResult<Entity> {
        self.seen.lock().unwrap().push(self.name);
        inner.get_by_id(entity_type, id).await
    }
}

/// Runs a fixed script of operations and returns what each observed.
async fn script(controller: &dyn ModelController) -> Vec<String> {
    let ty = note_type();
    let mut out = Vec::new();

    let created = controller.create_new(&ty).await.unwrap();
    out.push(format!("created {:?}", created.id()));

    let mut edited = created.clone();
    edited.set_field(0, "edited").unwrap();
    controller.update(&[edited.clone()]).await.unwrap();

    let copy = controller.copy(&edited).await.unwrap();
    out.push(format!("copy {:?} {:?}", copy.id(), copy.field(0)));

    out.push(format!("count {}", controller.count(&ty).await.unwrap()));
    out.push(format!("list {}", controller.list(&ty).await.unwrap().len()));

    let fetched = controller
        .get_by_ids(&ty, &[EntityId::new(2), EntityId::new(1)])
        .await
        .unwrap();
    out.push(format!("ids {:?}", fetched.iter().map(Readable::id).collect::<Vec<_>>()));

    controller.delete(&copy).await.unwrap();
    let missing = controller.get_by_id(&ty, EntityId::new(2)).await;
    out.push(format!("after delete {}", missing.is_err()));

    let unsaved = controller.delete(&Entity::new(ty.clone())).await;
    out.push(format!("unsaved {:?}", unsaved.map_err(|e| e.to_string())));
    out
}

fn stacked(depth: usize) -> (InMemoryController, Arc<dyn ModelController>) {
    let base = InMemoryController::new();
    let pipeline = (0..depth).fold(ControllerPipeline::new(base.clone()), |p, _| {
        p.layer(Passthrough)
    });
    (base, pipeline.build())
}

// ── Transparency ────────────────────────────────────────────────

#[tokio::test]
async fn passthrough_layers_change_nothing() {
    let (plain_base, plain) = stacked(0);
    let (deep_base, deep) = stacked(5);

    assert_eq!(script(plain.as_ref()).await, script(deep.as_ref()).await);
    assert_eq!(plain_base.calls(), deep_base.calls());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_depth_is_transparent(depth in 0usize..12) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (_, plain) = stacked(0);
        let (_, deep) = stacked(depth);
        let expected = runtime.block_on(script(plain.as_ref()));
        let actual = runtime.block_on(script(deep.as_ref()));
        prop_assert_eq!(expected, actual);
    }
}

#[tokio::test]
async fn inner_errors_pass_through_unchanged() {
    let (_, controller) = stacked(3);

    let err = controller
        .update(&[Entity::new(note_type())])
        .await
        .unwrap_err();

    assert!(matches!(err, ControllerError::NotPersisted { ref entity } if entity == "Note"));
}

// ── Ordering ────────────────────────────────────────────────────

#[tokio::test]
async fn outermost_layer_runs_first() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let base = InMemoryController::new();
    base.update(&[note(1, "a", None)]).await.unwrap();

    let controller = ControllerPipeline::new(base)
        .layer(Marker { name: "inner", seen: seen.clone() })
        .layer(Passthrough)
        .layer(Marker { name: "outer", seen: seen.clone() })
        .build();

    controller
        .get_by_id(&note_type(), EntityId::new(1))
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["outer", "inner"]);
}

#[tokio::test]
async fn layered_can_be_built_by_hand() {
    let base: Arc<dyn ModelController> = Arc::new(InMemoryController::new());
    let layered = Layered::new(Passthrough, base);

    let created = layered.create_new(&note_type()).await.unwrap();
    assert_eq!(created.id(), Some(EntityId::new(1)));
    assert_eq!(layered.count(&note_type()).await.unwrap(), 1);
}
