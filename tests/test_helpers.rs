//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use labelbench::config::InputConfig;
use labelbench::{
    Action, AnnotationTask, ItemContent, Modality, RegionDraft, Shape, TaskStatus, ToolController,
    WorkItem, WorkspaceStore,
};

/// Route workspace logs through the test harness. Safe to call from every
/// test; only the first call installs the subscriber.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn task(id: &str, modality: Modality) -> AnnotationTask {
    AnnotationTask {
        id: id.to_string(),
        name: format!("{id} task"),
        modality,
        status: TaskStatus::InProgress,
        dataset: "local".to_string(),
        completed_items: 0,
        total_items: 0,
    }
}

pub fn image_item(id: &str) -> WorkItem {
    let mut item = WorkItem::new(id, ItemContent::Url(format!("{id}.png")));
    item.pixel_size = Some((640, 480));
    item
}

pub fn text_item(id: &str, text: &str) -> WorkItem {
    WorkItem::new(id, ItemContent::Text(text.to_string()))
}

pub fn audio_item(id: &str, duration_ms: u64) -> WorkItem {
    let mut item = WorkItem::new(id, ItemContent::Url(format!("{id}.wav")));
    item.duration_ms = Some(duration_ms);
    item
}

pub fn scene_item(id: &str) -> WorkItem {
    WorkItem::new(id, ItemContent::Payload(serde_json::json!({ "mesh": id })))
}

/// A store with a task set and one item open, ready for edits.
pub fn open_store(modality: Modality, item: WorkItem) -> WorkspaceStore {
    let mut store = WorkspaceStore::new();
    store
        .dispatch(Action::SetTask(Arc::new(task("t1", modality))))
        .unwrap();
    store.dispatch(Action::SetCurrentItem(item)).unwrap();
    store
}

pub fn image_store() -> WorkspaceStore {
    open_store(Modality::Image, image_item("img-0"))
}

pub fn bbox(x: f32, y: f32, w: f32, h: f32) -> Shape {
    Shape::BoundingBox { x, y, w, h }
}

pub fn draft_box(x: f32, y: f32, w: f32, h: f32) -> RegionDraft {
    RegionDraft::new(bbox(x, y, w, h), "object")
}

pub fn controller() -> ToolController {
    let mut c = ToolController::new(&InputConfig::default());
    c.set_label("object");
    c
}

pub fn assert_box(shape: &Shape, x: f32, y: f32, w: f32, h: f32) {
    let Shape::BoundingBox {
        x: bx,
        y: by,
        w: bw,
        h: bh,
    } = shape
    else {
        panic!("expected a bounding box, got {shape:?}");
    };
    for (got, want) in [(bx, x), (by, y), (bw, w), (bh, h)] {
        assert!(
            (got - want).abs() < 1e-5,
            "box {shape:?} differs from ({x}, {y}, {w}, {h})"
        );
    }
}
