//! Hit-testing for the Select tool.
//!
//! All tests walk the region set in reverse insertion order so the topmost
//! (last-created) region wins on overlap.

use crate::geometry::{point_in_polygon, Point, Point3, Shape};
use crate::region::{Region, RegionId};

/// Topmost region containing a point on the normalized content plane.
pub fn hit_test_plane(regions: &[Region], p: Point) -> Option<RegionId> {
    for region in regions.iter().rev() {
        let inside = match &region.shape {
            Shape::BoundingBox { x, y, w, h } => {
                p.x >= *x && p.x <= x + w && p.y >= *y && p.y <= y + h
            }
            Shape::Polygon { points } => point_in_polygon(points, p),
            _ => false,
        };
        if inside {
            return Some(region.id);
        }
    }
    None
}

/// Topmost span containing a character offset.
pub fn hit_test_offset(regions: &[Region], offset: usize) -> Option<RegionId> {
    for region in regions.iter().rev() {
        if let Shape::TextSpan { start, end } = region.shape {
            if offset >= start && offset < end {
                return Some(region.id);
            }
        }
    }
    None
}

/// Topmost time range containing a millisecond position.
pub fn hit_test_time(regions: &[Region], ms: u64) -> Option<RegionId> {
    for region in regions.iter().rev() {
        if let Shape::TimeRange { start_ms, end_ms } = region.shape {
            if ms >= start_ms && ms < end_ms {
                return Some(region.id);
            }
        }
    }
    None
}

/// Nearest anchor within `radius` of a 3D pick, topmost on ties.
pub fn hit_test_anchor(regions: &[Region], p: Point3, radius: f32) -> Option<RegionId> {
    for region in regions.iter().rev() {
        if let Shape::Anchor3d { x, y, z } = region.shape {
            let (dx, dy, dz) = (p.x - x, p.y - y, p.z - z);
            if (dx * dx + dy * dy + dz * dz).sqrt() <= radius {
                return Some(region.id);
            }
        }
    }
    None
}
