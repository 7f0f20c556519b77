//! The visual tree produced by renderers.
//!
//! A `Scene` is a flat display list in viewport pixel coordinates. It carries
//! no behavior; the host shell walks it and paints. Nodes appear in z-order
//! (content first, regions in insertion order, preview last).

use crate::region::RegionId;

/// A point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPoint {
    pub x: f32,
    pub y: f32,
}

/// A rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl DisplayRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

/// One paintable element.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    /// Raster content placed at its letterboxed rect.
    Raster { source: String, rect: DisplayRect },
    /// Document text, optionally with a line-number gutter (code tasks).
    TextBlock { text: String, gutter: bool },
    /// Audio waveform strip across the timeline.
    Waveform { duration_ms: u64, rect: DisplayRect },
    /// Video frame strip across the timeline.
    FrameStrip { duration_ms: u64, rect: DisplayRect },
    /// 3D scene placeholder; the host supplies the actual viewport.
    SceneView { source: String },
    /// A box region.
    RegionRect {
        id: RegionId,
        rect: DisplayRect,
        label: String,
        selected: bool,
    },
    /// A polygon region, closed.
    RegionPath {
        id: RegionId,
        points: Vec<DisplayPoint>,
        label: String,
        selected: bool,
    },
    /// A text span region, in character offsets.
    SpanHighlight {
        id: RegionId,
        start: usize,
        end: usize,
        label: String,
        selected: bool,
    },
    /// A time range region, projected onto the timeline.
    TimeBand {
        id: RegionId,
        rect: DisplayRect,
        label: String,
        selected: bool,
    },
    /// A 3D anchor projected into the viewport; depth is the normalized z.
    Marker3d {
        id: RegionId,
        at: DisplayPoint,
        depth: f32,
        label: String,
        selected: bool,
    },
    /// The in-progress gesture, boxes and ranges.
    PreviewRect { rect: DisplayRect },
    /// The in-progress gesture, open polygons.
    PreviewPath { points: Vec<DisplayPoint> },
}

/// A complete render of one work item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }
}
