//! Navigation/session flow: sequencing through a task's work items.
//!
//! A small state machine over {Idle, Loading, Ready, Saving}. Loading and
//! Saving are the only asynchronous edges; the session is the sole awaiter
//! and the store is not touched while an await is pending, so a save in
//! flight can never interleave with a tool gesture. Failed loads stay in
//! `Loading` (retryable); failed saves return to `Ready` with the edits
//! intact. Navigation is refused while a save is in flight.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::error::{Result, WorkspaceError};
use crate::labels::LabelSchema;
use crate::region::{Region, RegionDraft};
use crate::state::{Action, WorkspaceStore};
use crate::task::{AnnotationTask, WorkItem};

/// External collaborator the workspace loads from.
#[allow(async_fn_in_trait)]
pub trait WorkItemSource {
    async fn fetch_task(&self, task_id: &str) -> Result<AnnotationTask>;
    /// Ordered item list for a task.
    async fn fetch_items(&self, task_id: &str) -> Result<Vec<WorkItem>>;
    /// Previously persisted regions for one item.
    async fn fetch_regions(&self, task_id: &str, item_id: &str) -> Result<Vec<RegionDraft>>;
    /// Label schema used to populate the side panel's label selector.
    async fn fetch_labels(&self, task_id: &str) -> Result<LabelSchema>;
}

/// External collaborator the workspace persists to.
#[allow(async_fn_in_trait)]
pub trait RegionSink {
    async fn put_regions(&self, task_id: &str, item_id: &str, regions: &[Region]) -> Result<()>;
}

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Loading,
    Ready,
    Saving,
}

/// What a successful save led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The next item is loaded and editable.
    Advanced,
    /// The item list is exhausted; the task is complete.
    TaskComplete,
}

type SaveHook = Box<dyn Fn(&[Region])>;
type ProgressHook = Box<dyn Fn(usize, usize)>;

/// One annotator working through one task.
pub struct AnnotationSession<S, K> {
    source: S,
    sink: K,
    store: WorkspaceStore,
    config: SessionConfig,
    phase: SessionPhase,
    task_id: String,
    items: Vec<WorkItem>,
    index: usize,
    completed: usize,
    labels: LabelSchema,
    on_save: Option<SaveHook>,
    on_progress: Option<ProgressHook>,
}

impl<S: WorkItemSource, K: RegionSink> AnnotationSession<S, K> {
    pub fn new(source: S, sink: K, config: SessionConfig) -> Self {
        Self {
            source,
            sink,
            store: WorkspaceStore::new(),
            config,
            phase: SessionPhase::Idle,
            task_id: String::new(),
            items: Vec::new(),
            index: 0,
            completed: 0,
            labels: LabelSchema::default(),
            on_save: None,
            on_progress: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn store(&self) -> &WorkspaceStore {
        &self.store
    }

    /// Mutable store access for the tool controller and side panel.
    pub fn store_mut(&mut self) -> &mut WorkspaceStore {
        &mut self.store
    }

    pub fn label_schema(&self) -> &LabelSchema {
        &self.labels
    }

    /// (completed, total) for the open task.
    pub fn progress(&self) -> (usize, usize) {
        (self.completed, self.items.len())
    }

    /// Invoked after each successful save, with the persisted region set.
    pub fn set_on_save(&mut self, hook: SaveHook) {
        self.on_save = Some(hook);
    }

    /// Invoked whenever the progress counters change.
    pub fn set_on_progress(&mut self, hook: ProgressHook) {
        self.on_progress = Some(hook);
    }

    /// Open a task and load its first item.
    ///
    /// Legal from `Idle`, from `Ready` once edits are saved, and from a
    /// failed `Loading` as a restart. Refused while a save is in flight.
    pub async fn start(&mut self, task_id: &str) -> Result<()> {
        if self.phase == SessionPhase::Saving {
            return Err(WorkspaceError::Busy("save in flight"));
        }
        if self.store.state().dirty {
            return Err(WorkspaceError::PendingEdits);
        }

        self.phase = SessionPhase::Loading;
        let task = self
            .source
            .fetch_task(task_id)
            .await
            .map_err(|e| WorkspaceError::Load(format!("task {task_id}: {e}")))?;
        let modality = task.modality;
        self.store.dispatch(Action::SetTask(Arc::new(task)))?;

        let mut items = self
            .source
            .fetch_items(task_id)
            .await
            .map_err(|e| WorkspaceError::Load(format!("items for {task_id}: {e}")))?;
        if self.config.shuffle_items {
            items.shuffle(&mut rand::thread_rng());
        }

        self.labels = self
            .source
            .fetch_labels(task_id)
            .await
            .map_err(|e| WorkspaceError::Load(format!("labels for {task_id}: {e}")))?;

        self.task_id = task_id.to_string();
        self.items = items;
        self.index = 0;
        self.completed = 0;

        if self.items.is_empty() {
            warn!(task = task_id, "task has no work items");
            self.phase = SessionPhase::Idle;
            self.notify_progress();
            return Ok(());
        }

        info!(task = task_id, %modality, items = self.items.len(), "session started");
        self.load_current().await
    }

    /// Retry a failed item load. Only meaningful in `Loading`.
    pub async fn retry_load(&mut self) -> Result<()> {
        if self.phase != SessionPhase::Loading {
            return Err(WorkspaceError::Busy("nothing to retry"));
        }
        if self.items.is_empty() {
            return Err(WorkspaceError::Load("no task opened; call start".into()));
        }
        self.load_current().await
    }

    /// Persist the current region set, then advance to the next item.
    ///
    /// On save failure the session returns to `Ready` with the in-memory
    /// edits exactly as they were; nothing is dropped or partially
    /// committed. On success the progress counters move and either the next
    /// item loads or the task completes.
    pub async fn save_and_advance(&mut self) -> Result<SaveOutcome> {
        if self.phase != SessionPhase::Ready {
            return Err(WorkspaceError::Busy("session is not ready"));
        }
        let Some(item) = self.store.state().item.as_ref() else {
            return Err(WorkspaceError::NoActiveItem);
        };
        let item_id = item.id.clone();

        self.phase = SessionPhase::Saving;
        let regions = self.store.state().regions.clone();
        if let Err(e) = self
            .sink
            .put_regions(&self.task_id, &item_id, &regions)
            .await
        {
            warn!(item = %item_id, error = %e, "save failed, edits kept");
            self.phase = SessionPhase::Ready;
            return Err(WorkspaceError::Save(e.to_string()));
        }

        if let Some(hook) = &self.on_save {
            hook(&regions);
        }
        self.store.mark_saved();
        self.items[self.index].completed = true;
        self.completed += 1;
        self.notify_progress();
        info!(item = %item_id, regions = regions.len(), "item saved");

        if self.index + 1 < self.items.len() {
            self.index += 1;
            self.load_current().await?;
            Ok(SaveOutcome::Advanced)
        } else {
            self.phase = SessionPhase::Idle;
            info!(task = %self.task_id, "task complete");
            Ok(SaveOutcome::TaskComplete)
        }
    }

    async fn load_current(&mut self) -> Result<()> {
        self.phase = SessionPhase::Loading;
        let item = self.items[self.index].clone();

        let drafts = self
            .source
            .fetch_regions(&self.task_id, &item.id)
            .await
            .map_err(|e| {
                warn!(item = %item.id, error = %e, "item load failed, retryable");
                WorkspaceError::Load(format!("regions for {}: {e}", item.id))
            })?;

        let item_id = item.id.clone();
        self.store.dispatch(Action::SetCurrentItem(item))?;
        let loaded = self.store.hydrate_regions(drafts);
        self.phase = SessionPhase::Ready;
        info!(item = %item_id, regions = loaded, "item loaded");
        Ok(())
    }

    fn notify_progress(&self) {
        if let Some(hook) = &self.on_progress {
            hook(self.completed, self.items.len());
        }
    }
}
