//! Geometry primitives shared by every modality.
//!
//! Spatial coordinates are normalized to [0, 1] over the content, so regions
//! survive zooming and window resizes without rescaling. Text spans are char
//! offsets, time ranges are millisecond offsets.

use serde::{Deserialize, Serialize};

/// A 2D point in normalized content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A 3D point in normalized scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// The shape of a single annotation.
///
/// Exactly one variant is legal per task modality; see
/// [`Modality::accepts_shape`](crate::region::Modality::accepts_shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    BoundingBox { x: f32, y: f32, w: f32, h: f32 },
    Polygon { points: Vec<Point> },
    TextSpan { start: usize, end: usize },
    TimeRange { start_ms: u64, end_ms: u64 },
    Anchor3d { x: f32, y: f32, z: f32 },
}

impl Shape {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::BoundingBox { .. } => "bbox",
            Shape::Polygon { .. } => "polygon",
            Shape::TextSpan { .. } => "text_span",
            Shape::TimeRange { .. } => "time_range",
            Shape::Anchor3d { .. } => "anchor3d",
        }
    }

    /// Build a box from two opposite corners, in any drag direction.
    ///
    /// Width and height are always non-negative: dragging up/left swaps the
    /// corners instead of producing a negative extent.
    pub fn box_from_corners(a: Point, b: Point) -> Shape {
        Shape::BoundingBox {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            w: (a.x - b.x).abs(),
            h: (a.y - b.y).abs(),
        }
    }

    /// Build a time range from two edges, in any drag direction.
    pub fn range_from_edges(a: u64, b: u64) -> Shape {
        Shape::TimeRange {
            start_ms: a.min(b),
            end_ms: a.max(b),
        }
    }

    /// Build a span from two offsets, in any selection direction.
    pub fn span_from_offsets(a: usize, b: usize) -> Shape {
        Shape::TextSpan {
            start: a.min(b),
            end: a.max(b),
        }
    }
}

/// Point-in-polygon test via ray casting. Open polygons and polygons with
/// fewer than 3 vertices never contain anything.
pub fn point_in_polygon(points: &[Point], p: Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        let crosses = (pi.y > p.y) != (pj.y > p.y)
            && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounds of a vertex list, as (min, max) corners.
pub fn polygon_bounds(points: &[Point]) -> Option<(Point, Point)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_from_corners_normalizes_any_drag_direction() {
        let up_left = Shape::box_from_corners(Point::new(0.5, 0.4), Point::new(0.1, 0.1));
        assert_eq!(
            up_left,
            Shape::BoundingBox {
                x: 0.1,
                y: 0.1,
                w: 0.4,
                h: 0.3
            }
        );
    }

    #[test]
    fn ray_cast_handles_concave_polygons() {
        // A "U" shape: the notch in the middle is outside.
        let u = vec![
            Point::new(0.0, 0.0),
            Point::new(0.6, 0.0),
            Point::new(0.6, 0.6),
            Point::new(0.4, 0.6),
            Point::new(0.4, 0.2),
            Point::new(0.2, 0.2),
            Point::new(0.2, 0.6),
            Point::new(0.0, 0.6),
        ];
        assert!(point_in_polygon(&u, Point::new(0.1, 0.4)));
        assert!(!point_in_polygon(&u, Point::new(0.3, 0.4)));
        assert!(point_in_polygon(&u, Point::new(0.3, 0.1)));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!(!point_in_polygon(&line, Point::new(0.5, 0.5)));
    }
}
