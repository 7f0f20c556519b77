//! Viewport mapping between display pixels and normalized content space.
//!
//! Content is fit into the viewport preserving aspect ratio (letterboxed or
//! pillarboxed), centered, then scaled by the zoom percentage. The inverse
//! mapping deliberately does not clamp: a gesture captured past the content
//! edge maps to coordinates outside [0,1] and is rejected by region
//! validation, not swallowed here.

use crate::geometry::Point;
use crate::render::scene::{DisplayPoint, DisplayRect};
use crate::state::ZOOM_DEFAULT;

/// The visible canvas and its zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Zoom percentage, 100 = fit.
    pub zoom: u16,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            zoom: ZOOM_DEFAULT,
        }
    }

    pub fn with_zoom(mut self, zoom: u16) -> Self {
        self.zoom = zoom;
        self
    }

    fn zoom_factor(&self) -> f32 {
        f32::from(self.zoom) / 100.0
    }

    /// Rect the content occupies after aspect-preserving fit, centering and
    /// zoom. May extend past the viewport when zoomed in.
    pub fn content_rect(&self, content_w: f32, content_h: f32) -> DisplayRect {
        if content_w <= 0.0 || content_h <= 0.0 {
            return DisplayRect {
                x: 0.0,
                y: 0.0,
                w: 0.0,
                h: 0.0,
            };
        }
        let fit = (self.width / content_w).min(self.height / content_h);
        let scale = fit * self.zoom_factor();
        let w = content_w * scale;
        let h = content_h * scale;
        DisplayRect {
            x: (self.width - w) / 2.0,
            y: (self.height - h) / 2.0,
            w,
            h,
        }
    }

    /// Timeline rect: full viewport width stretched by zoom.
    pub fn timeline_rect(&self) -> DisplayRect {
        DisplayRect {
            x: 0.0,
            y: 0.0,
            w: self.width * self.zoom_factor(),
            h: self.height,
        }
    }

    /// Map a display pixel back to normalized content coordinates.
    /// `None` only when the content rect is degenerate.
    pub fn to_normalized(&self, rect: DisplayRect, x: f32, y: f32) -> Option<Point> {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return None;
        }
        Some(Point::new((x - rect.x) / rect.w, (y - rect.y) / rect.h))
    }

    /// Map a normalized content point to display pixels.
    pub fn to_display(&self, rect: DisplayRect, p: Point) -> DisplayPoint {
        DisplayPoint {
            x: rect.x + p.x * rect.w,
            y: rect.y + p.y * rect.h,
        }
    }
}
