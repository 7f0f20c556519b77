//! Task and work item data model.
//!
//! Tasks are created and status-managed by external collaborators; inside the
//! workspace they are read-only except for progress counters, which the
//! session flow updates through its host callbacks. Work items are immutable
//! once fetched.

use serde::{Deserialize, Serialize};

use crate::region::{ContentExtent, Modality};

/// Lifecycle status of a labeling job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Archived,
}

/// A labeling job: a dataset of work items annotated under one modality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationTask {
    pub id: String,
    pub name: String,
    pub modality: Modality,
    pub status: TaskStatus,
    /// Reference to the source dataset (opaque to the workspace).
    pub dataset: String,
    #[serde(default)]
    pub completed_items: usize,
    #[serde(default)]
    pub total_items: usize,
}

/// Raw content of a work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemContent {
    /// Remote or on-disk media, fetched by the renderer host.
    Url(String),
    /// Inline document text (text and code tasks).
    Text(String),
    /// Structured payload (3D scenes, multi-stream items).
    Payload(serde_json::Value),
}

/// One unit to annotate inside a task. Read-only within the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub content: ItemContent,
    #[serde(default)]
    pub completed: bool,
    /// Natural pixel size of raster content, when known. Needed to compute
    /// the letterbox fit in the image renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_size: Option<(u32, u32)>,
    /// Media duration, when known (audio/video tasks).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl WorkItem {
    pub fn new(id: impl Into<String>, content: ItemContent) -> Self {
        Self {
            id: id.into(),
            content,
            completed: false,
            pixel_size: None,
            duration_ms: None,
        }
    }

    /// Content bounds for region validation under the given modality.
    ///
    /// When the length is not knowable from the item (URL-referenced text,
    /// media without a declared duration) the extent is unbounded above and
    /// only the lower bound is enforced.
    pub fn extent(&self, modality: Modality) -> ContentExtent {
        match modality {
            Modality::Image => ContentExtent::Plane,
            Modality::ThreeD => ContentExtent::Space,
            Modality::Text | Modality::Code => match &self.content {
                ItemContent::Text(text) => ContentExtent::Chars(text.chars().count()),
                _ => ContentExtent::Chars(usize::MAX),
            },
            Modality::Audio | Modality::Video => {
                ContentExtent::Millis(self.duration_ms.unwrap_or(u64::MAX))
            }
        }
    }
}
