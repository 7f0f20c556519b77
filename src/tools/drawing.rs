//! Press-drag-release gestures: bounding boxes on the content plane.

use crate::geometry::{Point, Shape};

/// Anchor of an in-progress drag. Controller-local; never enters the store.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragAnchor {
    pub start: Point,
}

impl DragAnchor {
    pub fn new(start: Point) -> Self {
        Self { start }
    }

    /// Preview box for the current cursor position.
    pub fn preview(&self, cursor: Point) -> Shape {
        Shape::box_from_corners(self.start, cursor)
    }

    /// Final box on release, or `None` when either side is below the minimum
    /// drag epsilon. Accidental clicks leave no trace.
    pub fn finish(&self, cursor: Point, min_drag: f32) -> Option<Shape> {
        let shape = self.preview(cursor);
        match shape {
            Shape::BoundingBox { w, h, .. } if w >= min_drag && h >= min_drag => Some(shape),
            _ => None,
        }
    }
}
