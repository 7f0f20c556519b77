//! File-backed task storage.
//!
//! A `FileStore` serves a task from a directory: a `manifest.json` describing
//! the task and its item list, an optional `labels.yaml`, and one JSON file
//! per item holding its saved regions. Useful for offline annotation and as
//! the concrete source/sink in tests; the hosted deployment talks to the
//! dataset service instead.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, WorkspaceError};
use crate::labels::{parse_label_content, LabelSchema};
use crate::region::{Region, RegionDraft};
use crate::session::{RegionSink, WorkItemSource};
use crate::task::{AnnotationTask, WorkItem};

/// On-disk manifest format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub task: AnnotationTask,
    pub items: Vec<WorkItem>,
}

/// A task directory opened for reading and writing.
pub struct FileStore {
    root: PathBuf,
    manifest: Manifest,
}

impl FileStore {
    /// Open a task directory by its manifest.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let manifest_path = root.join("manifest.json");
        let content = fs::read_to_string(&manifest_path).map_err(|e| {
            WorkspaceError::Load(format!("read {}: {e}", manifest_path.display()))
        })?;
        let manifest: Manifest = serde_json::from_str(&content)
            .map_err(|e| WorkspaceError::Load(format!("parse manifest: {e}")))?;
        if manifest.items.is_empty() {
            return Err(WorkspaceError::Load("manifest has no items".into()));
        }
        Ok(Self { root, manifest })
    }

    /// Create a new task directory with a manifest.
    pub fn create(root: impl Into<PathBuf>, manifest: Manifest) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let json = serde_json::to_string_pretty(&manifest)?;
        fs::write(root.join("manifest.json"), json)?;
        Ok(Self { root, manifest })
    }

    pub fn task(&self) -> &AnnotationTask {
        &self.manifest.task
    }

    fn regions_path(&self, item_id: &str) -> PathBuf {
        self.root.join("regions").join(format!("{item_id}.json"))
    }

    fn read_regions(&self, item_id: &str) -> Result<Vec<Region>> {
        let path = self.regions_path(item_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl WorkItemSource for FileStore {
    async fn fetch_task(&self, task_id: &str) -> Result<AnnotationTask> {
        if self.manifest.task.id != task_id {
            return Err(WorkspaceError::Load(format!(
                "task {task_id} not in this store"
            )));
        }
        Ok(self.manifest.task.clone())
    }

    async fn fetch_items(&self, _task_id: &str) -> Result<Vec<WorkItem>> {
        Ok(self.manifest.items.clone())
    }

    async fn fetch_regions(&self, _task_id: &str, item_id: &str) -> Result<Vec<RegionDraft>> {
        let regions = self.read_regions(item_id)?;
        debug!(item = item_id, count = regions.len(), "regions read");
        Ok(regions
            .into_iter()
            .map(|r| RegionDraft {
                shape: r.shape,
                label: r.label,
                confidence: r.confidence,
                attributes: r.attributes,
            })
            .collect())
    }

    async fn fetch_labels(&self, _task_id: &str) -> Result<LabelSchema> {
        let path = self.root.join("labels.yaml");
        if !path.exists() {
            return Ok(LabelSchema::default());
        }
        let content = fs::read_to_string(&path)?;
        parse_label_content(&content)
    }
}

impl RegionSink for FileStore {
    async fn put_regions(&self, _task_id: &str, item_id: &str, regions: &[Region]) -> Result<()> {
        let path = self.regions_path(item_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(regions)?;
        fs::write(&path, json)
            .map_err(|e| WorkspaceError::Save(format!("write {}: {e}", path.display())))?;
        debug!(item = item_id, count = regions.len(), "regions written");
        Ok(())
    }
}

/// Scan a directory of images into a manifest for an image task, sorted for
/// a consistent item order.
pub fn manifest_from_image_folder(task: AnnotationTask, folder: &Path) -> Result<Manifest> {
    const EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
            if let Some(name) = path.file_name().and_then(|f| f.to_str()) {
                files.push(name.to_string());
            }
        }
    }
    if files.is_empty() {
        return Err(WorkspaceError::Load("no image files in folder".into()));
    }
    files.sort();

    let items = files
        .into_iter()
        .map(|name| {
            let stem = Path::new(&name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(&name)
                .to_string();
            WorkItem::new(stem, crate::task::ItemContent::Url(name))
        })
        .collect();

    Ok(Manifest { task, items })
}
