//! Multi-click polygon gesture: a vertex buffer that closes into a shape.

use crate::geometry::{Point, Shape};

/// Vertices of an in-progress polygon. Controller-local; discarded on tool
/// switch or abort without touching the store.
#[derive(Debug, Default)]
pub(crate) struct VertexBuffer {
    points: Vec<Point>,
}

impl VertexBuffer {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Whether a click at `p` counts as the closing click (near the first
    /// vertex, with enough vertices to form a polygon).
    pub fn closes_at(&self, p: Point, close_radius: f32) -> bool {
        self.points.len() >= 3
            && self
                .points
                .first()
                .is_some_and(|first| first.distance_to(p) <= close_radius)
    }

    /// Open preview of the buffer so far.
    pub fn preview(&self) -> Shape {
        Shape::Polygon {
            points: self.points.clone(),
        }
    }

    /// Close the buffer into a polygon, emptying it. `None` with fewer than
    /// 3 vertices; the buffer is still cleared (the gesture is over).
    pub fn close(&mut self) -> Option<Shape> {
        let points = std::mem::take(&mut self.points);
        if points.len() < 3 {
            return None;
        }
        Some(Shape::Polygon { points })
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
