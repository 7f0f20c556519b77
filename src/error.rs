//! Error types for the annotation workspace.

use thiserror::Error;

use crate::region::{Modality, RegionId, Tool};

/// Result type used throughout the workspace core.
pub type Result<T> = std::result::Result<T, WorkspaceError>;

/// Errors surfaced by the workspace core.
///
/// None of these are fatal: store transitions that fail leave the state
/// unchanged, and load/save failures keep the session in a retryable phase.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// A region shape that the task's modality cannot carry (e.g. a bounding
    /// box on a text task).
    #[error("shape '{shape}' is not valid for a {modality} task")]
    InvalidShapeForModality {
        shape: &'static str,
        modality: Modality,
    },

    /// A region coordinate outside the content bounds.
    #[error("region out of bounds: {0}")]
    OutOfBounds(String),

    /// A tool the current modality cannot use.
    #[error("tool {tool} cannot be used on a {modality} task")]
    IncompatibleTool { tool: Tool, modality: Modality },

    /// Region id not present in the live region set.
    #[error("unknown region id {0}")]
    UnknownRegion(RegionId),

    /// An action that requires an active task arrived before `SET_TASK`.
    #[error("no task is active")]
    NoActiveTask,

    /// An action that requires a loaded work item arrived before one was set.
    #[error("no work item is loaded")]
    NoActiveItem,

    /// Refusing to replace the task while unsaved edits are pending.
    #[error("unsaved edits pending; save before switching tasks")]
    PendingEdits,

    /// The session is in a phase that cannot accept the request.
    #[error("workspace busy: {0}")]
    Busy(&'static str),

    /// Item content or regions could not be fetched. Retryable.
    #[error("load failed: {0}")]
    Load(String),

    /// Region persistence failed. Retryable; in-memory edits are preserved.
    #[error("save failed: {0}")]
    Save(String),

    /// Label schema could not be read or parsed.
    #[error("label schema error: {0}")]
    Schema(String),

    /// Configuration file error.
    #[error("config error: {0}")]
    Config(String),

    /// File I/O error (local persistence helpers).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (local persistence helpers).
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
