//! Core of a multi-modal annotation workspace.
//!
//! Everything the per-modality editors share lives here:
//!
//! - the region model and its validation ([`region`], [`geometry`])
//! - the workspace state store, a single-writer reducer ([`state`])
//! - the tool controller turning gestures into store actions ([`tools`])
//! - the renderer contract and one implementation per modality ([`render`])
//! - the navigation/session flow over async load/save boundaries
//!   ([`session`], [`persist`])
//!
//! The store is the single source of truth: renderers read it, gestures
//! write to it through dispatched actions only, and the session is the only
//! component that crosses the async I/O boundary.

pub mod config;
pub mod error;
pub mod geometry;
pub mod labels;
pub mod persist;
pub mod region;
pub mod render;
pub mod session;
pub mod state;
pub mod task;
pub mod tools;

pub use error::{Result, WorkspaceError};
pub use geometry::{Point, Point3, Shape};
pub use region::{Modality, Region, RegionDraft, RegionId, Tool};
pub use session::{AnnotationSession, RegionSink, SaveOutcome, SessionPhase, WorkItemSource};
pub use state::{Action, WorkspaceState, WorkspaceStore};
pub use task::{AnnotationTask, ItemContent, TaskStatus, WorkItem};
pub use tools::{GestureOutcome, Key, PointerEvent, ToolController};
