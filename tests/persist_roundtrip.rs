//! FileStore: manifest handling, per-item region files and folder scans.

mod test_helpers;

use std::fs;

use labelbench::config::SessionConfig;
use labelbench::persist::{manifest_from_image_folder, FileStore, Manifest};
use labelbench::{
    Action, AnnotationSession, Modality, SaveOutcome, Shape, WorkItemSource,
};
use test_helpers::*;

fn image_manifest() -> Manifest {
    Manifest {
        task: task("t1", Modality::Image),
        items: vec![image_item("a"), image_item("b")],
    }
}

#[tokio::test]
async fn saved_regions_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    FileStore::create(dir.path(), image_manifest()).unwrap();

    let source = FileStore::open(dir.path()).unwrap();
    let sink = FileStore::open(dir.path()).unwrap();
    let mut session = AnnotationSession::new(source, sink, SessionConfig::default());

    session.start("t1").await.unwrap();
    session
        .store_mut()
        .dispatch(Action::AddRegion(draft_box(0.1, 0.1, 0.3, 0.3)))
        .unwrap();
    assert_eq!(session.save_and_advance().await.unwrap(), SaveOutcome::Advanced);
    drop(session);

    let reopened = FileStore::open(dir.path()).unwrap();
    let drafts = reopened.fetch_regions("t1", "a").await.unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].label, "object");
    assert_box(&drafts[0].shape, 0.1, 0.1, 0.3, 0.3);

    // The second item was never saved.
    assert!(reopened.fetch_regions("t1", "b").await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_region_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::create(dir.path(), image_manifest()).unwrap();
    assert!(store.fetch_regions("t1", "a").await.unwrap().is_empty());
}

#[tokio::test]
async fn hydration_restores_persisted_shapes() {
    let dir = tempfile::tempdir().unwrap();
    FileStore::create(dir.path(), image_manifest()).unwrap();

    {
        let source = FileStore::open(dir.path()).unwrap();
        let sink = FileStore::open(dir.path()).unwrap();
        let mut session = AnnotationSession::new(source, sink, SessionConfig::default());
        session.start("t1").await.unwrap();
        session
            .store_mut()
            .dispatch(Action::AddRegion(draft_box(0.2, 0.2, 0.5, 0.4)))
            .unwrap();
        session.save_and_advance().await.unwrap();
    }

    let source = FileStore::open(dir.path()).unwrap();
    let sink = FileStore::open(dir.path()).unwrap();
    let mut session = AnnotationSession::new(source, sink, SessionConfig::default());
    session.start("t1").await.unwrap();

    let state = session.store().state();
    assert_eq!(state.regions.len(), 1);
    assert!(matches!(state.regions[0].shape, Shape::BoundingBox { .. }));
    assert!(!state.dirty);
}

#[tokio::test]
async fn labels_yaml_is_served_from_the_task_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::create(dir.path(), image_manifest()).unwrap();
    fs::write(
        dir.path().join("labels.yaml"),
        "- title: car\n  name: car\n  color: \"#ff0000\"\n",
    )
    .unwrap();

    let schema = store.fetch_labels("t1").await.unwrap();
    assert!(schema.contains("car"));
    assert_eq!(schema.color_of("car"), Some("#ff0000"));
}

#[test]
fn open_rejects_a_manifest_without_items() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = Manifest {
        task: task("t1", Modality::Image),
        items: Vec::new(),
    };
    let json = serde_json::to_string(&manifest).unwrap();
    fs::write(dir.path().join("manifest.json"), json).unwrap();

    assert!(FileStore::open(dir.path()).is_err());
}

#[test]
fn folder_scan_filters_and_sorts_image_files() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.png", "a.jpg", "notes.txt", "c.JPG"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }

    let manifest = manifest_from_image_folder(task("t1", Modality::Image), dir.path()).unwrap();
    let ids: Vec<_> = manifest.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn folder_scan_rejects_a_folder_with_no_images() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("readme.md"), b"").unwrap();
    assert!(manifest_from_image_folder(task("t1", Modality::Image), dir.path()).is_err());
}
