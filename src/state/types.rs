//! The workspace state aggregate.

use std::sync::Arc;

use crate::region::{ContentExtent, Modality, Region, RegionId, Tool};
use crate::task::{AnnotationTask, WorkItem};

/// Zoom limits, in percent. Values outside are clamped, never rejected.
pub const ZOOM_MIN: u16 = 25;
pub const ZOOM_MAX: u16 = 400;
pub const ZOOM_DEFAULT: u16 = 100;

/// Aggregate state of one open workspace.
///
/// All renderers read this and all gestures write to it through
/// [`WorkspaceStore::dispatch`](super::WorkspaceStore::dispatch) only. Regions
/// are held for the open item alone; navigating to another item discards them.
#[derive(Debug, Clone)]
pub struct WorkspaceState {
    /// The open task. Shared with the host, read-only here.
    pub task: Option<Arc<AnnotationTask>>,
    /// The open work item, or `None` before the first load.
    pub item: Option<WorkItem>,
    /// Live region set for the open item. Insertion order is preserved and
    /// doubles as z-order for rendering.
    pub regions: Vec<Region>,
    /// Currently selected tool.
    pub tool: Tool,
    /// Zoom percentage, always within [`ZOOM_MIN`]..=[`ZOOM_MAX`].
    pub zoom: u16,
    /// Region currently targeted for attribute editing, if any.
    pub selection: Option<RegionId>,
    /// Whether the region set has edits not yet persisted.
    pub dirty: bool,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self {
            task: None,
            item: None,
            regions: Vec::new(),
            tool: Tool::Select,
            zoom: ZOOM_DEFAULT,
            selection: None,
            dirty: false,
        }
    }

    /// Modality of the open task, if one is set.
    pub fn modality(&self) -> Option<Modality> {
        self.task.as_ref().map(|t| t.modality)
    }

    /// Content extent of the open item under the open task's modality.
    pub fn extent(&self) -> Option<ContentExtent> {
        let modality = self.modality()?;
        self.item.as_ref().map(|i| i.extent(modality))
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub(crate) fn region_index(&self, id: RegionId) -> Option<usize> {
        self.regions.iter().position(|r| r.id == id)
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}
