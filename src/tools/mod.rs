//! Tool controller: turns raw gestures into store actions.
//!
//! Each tool is a small state machine. In-progress gesture state (the drag
//! anchor, the polygon vertex buffer) lives here, outside the store, and is
//! discarded on tool switch or abort; only completed gestures become actions.
//! Gestures that would produce an invalid region are silently discarded at
//! commit time, leaving no trace.

mod drawing;
mod polygon;
pub mod selection;
mod span;

use tracing::debug;

use crate::config::InputConfig;
use crate::geometry::{Point, Point3, Shape};
use crate::region::{RegionDraft, RegionId, Tool};
use crate::state::{Action, WorkspaceStore};

use drawing::DragAnchor;
use polygon::VertexBuffer;
use span::TimeAnchor;

/// A pointer interaction on the content plane, already mapped to normalized
/// workspace coordinates by the active renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release(Point),
    Click(Point),
    DoubleClick(Point),
}

/// Keyboard input the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
}

/// What a gesture step produced.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Nothing to do (event not meaningful for the active tool).
    Idle,
    /// An in-progress shape for the renderer to draw as a preview.
    Preview(Shape),
    /// A region was committed to the store.
    Committed(RegionId),
    /// The Select tool resolved a hit test (possibly to nothing).
    Selected(Option<RegionId>),
    /// The gesture ended without creating anything.
    Discarded,
}

/// Per-workspace gesture interpreter.
pub struct ToolController {
    /// Label applied to newly created regions; set from the side panel.
    label: String,
    drag: Option<DragAnchor>,
    vertices: VertexBuffer,
    time_anchor: Option<TimeAnchor>,
    min_drag: f32,
    close_radius: f32,
    anchor_hit_radius: f32,
}

impl ToolController {
    pub fn new(input: &InputConfig) -> Self {
        Self {
            label: String::new(),
            drag: None,
            vertices: VertexBuffer::default(),
            time_anchor: None,
            min_drag: input.min_drag,
            close_radius: input.close_radius,
            anchor_hit_radius: input.anchor_hit_radius,
        }
    }

    /// Label newly created regions will carry.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Switch tools through the store. On success any in-progress gesture is
    /// discarded; on rejection (incompatible tool) the buffers survive.
    pub fn select_tool(&mut self, tool: Tool, store: &mut WorkspaceStore) -> crate::Result<()> {
        store.dispatch(Action::SetTool(tool))?;
        self.abort_gesture();
        Ok(())
    }

    /// Drop any in-progress gesture without touching the store.
    pub fn abort_gesture(&mut self) {
        self.drag = None;
        self.time_anchor = None;
        self.vertices.clear();
    }

    /// Handle a pointer event on the content plane.
    pub fn on_pointer(&mut self, event: PointerEvent, store: &mut WorkspaceStore) -> GestureOutcome {
        match store.state().tool {
            Tool::Select => self.select_at(event, store),
            Tool::CreateBoundingBox => self.draw_box(event, store),
            Tool::CreatePolygon => self.draw_polygon(event, store),
            // Text spans, time ranges and 3D anchors arrive through their
            // own entry points; plane pointer events mean nothing to them.
            _ => GestureOutcome::Idle,
        }
    }

    /// Handle a key press.
    pub fn on_key(&mut self, key: Key, store: &mut WorkspaceStore) -> GestureOutcome {
        match key {
            Key::Escape => {
                if self.drag.is_some() || self.time_anchor.is_some() || !self.vertices.is_empty() {
                    self.abort_gesture();
                    GestureOutcome::Discarded
                } else {
                    GestureOutcome::Idle
                }
            }
            Key::Enter => {
                if store.state().tool == Tool::CreatePolygon && !self.vertices.is_empty() {
                    self.close_polygon(store)
                } else {
                    GestureOutcome::Idle
                }
            }
        }
    }

    /// Commit a native text selection as a span. No multi-step gesture: the
    /// selection range arrives complete from the text renderer.
    pub fn on_text_selection(
        &mut self,
        a: usize,
        b: usize,
        store: &mut WorkspaceStore,
    ) -> GestureOutcome {
        if store.state().tool != Tool::CreateTextSpan {
            return GestureOutcome::Idle;
        }
        match span::span_from_selection(a, b) {
            Some(shape) => self.commit(shape, store),
            None => GestureOutcome::Discarded,
        }
    }

    /// Select the topmost span at a character offset.
    pub fn on_offset_click(&mut self, offset: usize, store: &mut WorkspaceStore) -> GestureOutcome {
        if store.state().tool != Tool::Select {
            return GestureOutcome::Idle;
        }
        let hit = selection::hit_test_offset(&store.state().regions, offset);
        self.apply_selection(hit, store)
    }

    /// Start a drag along the time axis.
    pub fn on_time_press(&mut self, ms: u64, store: &WorkspaceStore) -> GestureOutcome {
        if store.state().tool != Tool::CreateTimeRange {
            return GestureOutcome::Idle;
        }
        self.time_anchor = Some(TimeAnchor::new(ms));
        GestureOutcome::Preview(Shape::range_from_edges(ms, ms))
    }

    /// Drag update along the time axis.
    pub fn on_time_move(&mut self, ms: u64) -> GestureOutcome {
        match self.time_anchor {
            Some(anchor) => GestureOutcome::Preview(anchor.preview(ms)),
            None => GestureOutcome::Idle,
        }
    }

    /// Finish a time-axis drag, committing the range.
    pub fn on_time_release(&mut self, ms: u64, store: &mut WorkspaceStore) -> GestureOutcome {
        let Some(anchor) = self.time_anchor.take() else {
            return GestureOutcome::Idle;
        };
        match anchor.finish(ms) {
            Some(shape) => self.commit(shape, store),
            None => GestureOutcome::Discarded,
        }
    }

    /// Select the topmost time range at a position.
    pub fn on_time_click(&mut self, ms: u64, store: &mut WorkspaceStore) -> GestureOutcome {
        if store.state().tool != Tool::Select {
            return GestureOutcome::Idle;
        }
        let hit = selection::hit_test_time(&store.state().regions, ms);
        self.apply_selection(hit, store)
    }

    /// Place or select a 3D anchor from a projected pick.
    pub fn on_spatial_pick(&mut self, p: Point3, store: &mut WorkspaceStore) -> GestureOutcome {
        match store.state().tool {
            Tool::CreateAnchor3d => self.commit(
                Shape::Anchor3d {
                    x: p.x,
                    y: p.y,
                    z: p.z,
                },
                store,
            ),
            Tool::Select => {
                let hit =
                    selection::hit_test_anchor(&store.state().regions, p, self.anchor_hit_radius);
                self.apply_selection(hit, store)
            }
            _ => GestureOutcome::Idle,
        }
    }

    fn select_at(&mut self, event: PointerEvent, store: &mut WorkspaceStore) -> GestureOutcome {
        let PointerEvent::Click(p) = event else {
            return GestureOutcome::Idle;
        };
        let hit = selection::hit_test_plane(&store.state().regions, p);
        self.apply_selection(hit, store)
    }

    fn apply_selection(
        &mut self,
        hit: Option<RegionId>,
        store: &mut WorkspaceStore,
    ) -> GestureOutcome {
        // Total by construction; SelectRegion never rejects.
        let _ = store.dispatch(Action::SelectRegion(hit));
        GestureOutcome::Selected(store.state().selection)
    }

    fn draw_box(&mut self, event: PointerEvent, store: &mut WorkspaceStore) -> GestureOutcome {
        match event {
            PointerEvent::Press(p) => {
                let anchor = DragAnchor::new(p);
                let preview = anchor.preview(p);
                self.drag = Some(anchor);
                GestureOutcome::Preview(preview)
            }
            PointerEvent::Move(p) => match &self.drag {
                Some(anchor) => GestureOutcome::Preview(anchor.preview(p)),
                None => GestureOutcome::Idle,
            },
            PointerEvent::Release(p) => {
                let Some(anchor) = self.drag.take() else {
                    return GestureOutcome::Idle;
                };
                match anchor.finish(p, self.min_drag) {
                    Some(shape) => self.commit(shape, store),
                    None => GestureOutcome::Discarded,
                }
            }
            _ => GestureOutcome::Idle,
        }
    }

    fn draw_polygon(&mut self, event: PointerEvent, store: &mut WorkspaceStore) -> GestureOutcome {
        match event {
            PointerEvent::Click(p) => {
                if self.vertices.closes_at(p, self.close_radius) {
                    return self.close_polygon(store);
                }
                self.vertices.push(p);
                GestureOutcome::Preview(self.vertices.preview())
            }
            PointerEvent::DoubleClick(_) => self.close_polygon(store),
            _ => GestureOutcome::Idle,
        }
    }

    fn close_polygon(&mut self, store: &mut WorkspaceStore) -> GestureOutcome {
        match self.vertices.close() {
            Some(shape) => self.commit(shape, store),
            None => GestureOutcome::Discarded,
        }
    }

    /// Commit a completed shape. Validation failures are expected and
    /// frequent (gestures past the content edge); they are logged at debug
    /// level and otherwise leave no trace.
    fn commit(&mut self, shape: Shape, store: &mut WorkspaceStore) -> GestureOutcome {
        let draft = RegionDraft::new(shape, self.label.clone());
        match store.add_region(draft) {
            Ok(id) => GestureOutcome::Committed(id),
            Err(e) => {
                debug!(error = %e, "gesture discarded at commit");
                GestureOutcome::Discarded
            }
        }
    }
}
