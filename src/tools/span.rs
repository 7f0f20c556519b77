//! Offset-based gestures: text spans and time ranges.

use crate::geometry::Shape;

/// Span from a native text selection, committed immediately on selection end.
/// Empty selections produce nothing.
pub(crate) fn span_from_selection(a: usize, b: usize) -> Option<Shape> {
    if a == b {
        return None;
    }
    Some(Shape::span_from_offsets(a, b))
}

/// Anchor of an in-progress drag along the time axis.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimeAnchor {
    pub start_ms: u64,
}

impl TimeAnchor {
    pub fn new(start_ms: u64) -> Self {
        Self { start_ms }
    }

    pub fn preview(&self, cursor_ms: u64) -> Shape {
        Shape::range_from_edges(self.start_ms, cursor_ms)
    }

    /// Final range on release. Zero-length ranges are accidental clicks.
    pub fn finish(&self, cursor_ms: u64) -> Option<Shape> {
        if cursor_ms == self.start_ms {
            return None;
        }
        Some(self.preview(cursor_ms))
    }
}
