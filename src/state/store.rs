//! The workspace store: a single-writer state machine over [`WorkspaceState`].
//!
//! Transitions are synchronous and total: every action from every reachable
//! state produces a defined next state. Rejections are surfaced as `Err` with
//! the state left exactly as it was; recoverable oddities (updating a region
//! that no longer exists) are logged no-ops.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Result, WorkspaceError};
use crate::region::{validate_region, validate_shape, Region, RegionDraft, RegionId, Tool};
use crate::state::types::{WorkspaceState, ZOOM_MAX, ZOOM_MIN};
use crate::task::{AnnotationTask, WorkItem};

/// The discriminated action union dispatched into the store.
#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the open task. Resets the region set. Rejected while unsaved
    /// edits are pending.
    SetTask(Arc<AnnotationTask>),
    /// Swap the open work item, discarding in-memory regions for the previous
    /// one. The caller is responsible for having saved them beforehand.
    SetCurrentItem(WorkItem),
    /// Change the selected tool. Rejected when the open task's modality
    /// cannot use it.
    SetTool(Tool),
    /// Append a new region. Validated first; the store assigns the id.
    AddRegion(RegionDraft),
    /// Replace the region with the matching id. Unknown ids are logged, not
    /// fatal.
    UpdateRegion(Region),
    /// Remove a region by id, clearing the selection if it pointed there.
    DeleteRegion(RegionId),
    /// Set the zoom percentage, clamped to the legal range.
    SetZoom(i32),
    /// Set or clear the transient selection.
    SelectRegion(Option<RegionId>),
}

/// Owner of the workspace state and the only writer to it.
#[derive(Debug)]
pub struct WorkspaceStore {
    state: WorkspaceState,
    next_id: RegionId,
}

impl WorkspaceStore {
    pub fn new() -> Self {
        Self {
            state: WorkspaceState::new(),
            next_id: 1,
        }
    }

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    /// Apply one action. On `Err` the state is unchanged.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::SetTask(task) => self.set_task(task),
            Action::SetCurrentItem(item) => self.set_current_item(item),
            Action::SetTool(tool) => self.set_tool(tool),
            Action::AddRegion(draft) => self.add_region(draft).map(|_| ()),
            Action::UpdateRegion(region) => self.update_region(region),
            Action::DeleteRegion(id) => self.delete_region(id),
            Action::SetZoom(level) => {
                self.state.zoom = level.clamp(ZOOM_MIN as i32, ZOOM_MAX as i32) as u16;
                Ok(())
            }
            Action::SelectRegion(id) => self.select_region(id),
        }
    }

    fn set_task(&mut self, task: Arc<AnnotationTask>) -> Result<()> {
        if self.state.dirty {
            return Err(WorkspaceError::PendingEdits);
        }
        // Defend against a stale tool carried over from the previous task's
        // modality.
        if !task.modality.allows_tool(self.state.tool) {
            self.state.tool = Tool::Select;
        }
        self.state.task = Some(task);
        self.state.item = None;
        self.state.regions.clear();
        self.state.selection = None;
        Ok(())
    }

    fn set_current_item(&mut self, item: WorkItem) -> Result<()> {
        if self.state.task.is_none() {
            return Err(WorkspaceError::NoActiveTask);
        }
        self.state.regions.clear();
        self.state.selection = None;
        self.state.dirty = false;
        self.state.item = Some(item);
        Ok(())
    }

    fn set_tool(&mut self, tool: Tool) -> Result<()> {
        let Some(modality) = self.state.modality() else {
            return Err(WorkspaceError::NoActiveTask);
        };
        if !modality.allows_tool(tool) {
            return Err(WorkspaceError::IncompatibleTool { tool, modality });
        }
        self.state.tool = tool;
        Ok(())
    }

    /// Validate and append a region, returning its assigned id.
    pub(crate) fn add_region(&mut self, draft: RegionDraft) -> Result<RegionId> {
        let Some(modality) = self.state.modality() else {
            return Err(WorkspaceError::NoActiveTask);
        };
        let Some(item) = self.state.item.as_ref() else {
            return Err(WorkspaceError::NoActiveItem);
        };
        validate_region(&draft, modality, item.extent(modality))?;

        let id = self.next_id;
        self.next_id += 1;
        self.state.regions.push(Region {
            id,
            item_id: item.id.clone(),
            shape: draft.shape,
            label: draft.label,
            confidence: draft.confidence,
            attributes: draft.attributes,
        });
        self.state.dirty = true;
        Ok(id)
    }

    fn update_region(&mut self, region: Region) -> Result<()> {
        let Some(idx) = self.state.region_index(region.id) else {
            warn!(id = region.id, "update for unknown region ignored");
            return Ok(());
        };
        let Some(modality) = self.state.modality() else {
            return Err(WorkspaceError::NoActiveTask);
        };
        let Some(item) = self.state.item.as_ref() else {
            return Err(WorkspaceError::NoActiveItem);
        };
        // The modality invariant must hold across updates too.
        validate_shape(&region.shape, modality, item.extent(modality))?;
        self.state.regions[idx] = region;
        self.state.dirty = true;
        Ok(())
    }

    fn delete_region(&mut self, id: RegionId) -> Result<()> {
        let Some(idx) = self.state.region_index(id) else {
            warn!(id, "delete for unknown region ignored");
            return Ok(());
        };
        self.state.regions.remove(idx);
        if self.state.selection == Some(id) {
            self.state.selection = None;
        }
        self.state.dirty = true;
        Ok(())
    }

    fn select_region(&mut self, id: Option<RegionId>) -> Result<()> {
        self.state.selection = match id {
            Some(id) if self.state.region(id).is_some() => Some(id),
            Some(id) => {
                warn!(id, "selection of unknown region cleared");
                None
            }
            None => None,
        };
        Ok(())
    }

    /// Seed the region set with previously persisted regions after a
    /// `SetCurrentItem`. Not a user edit: the dirty flag is left untouched
    /// and individually invalid regions are skipped with a warning.
    pub(crate) fn hydrate_regions(&mut self, drafts: Vec<RegionDraft>) -> usize {
        let mut loaded = 0;
        for draft in drafts {
            match self.add_region(draft) {
                Ok(_) => loaded += 1,
                Err(e) => debug!(error = %e, "skipping persisted region"),
            }
        }
        self.state.dirty = false;
        loaded
    }

    /// Mark the current region set as persisted.
    pub(crate) fn mark_saved(&mut self) {
        self.state.dirty = false;
    }
}

impl Default for WorkspaceStore {
    fn default() -> Self {
        Self::new()
    }
}
