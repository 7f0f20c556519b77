//! Audio and video renderers: regions on a millisecond timeline.
//!
//! Both share the same geometry: the timeline spans the viewport width
//! stretched by zoom, and a pointer x-position inverse-maps to a millisecond
//! offset into the media.

use crate::geometry::Shape;
use crate::region::{Modality, Region};
use crate::render::scene::{DisplayRect, Scene, SceneNode};
use crate::render::{MappedGesture, ModalityRenderer, RawGesture, RenderContext, Viewport};
use crate::task::WorkItem;

pub struct AudioRenderer;
pub struct VideoRenderer;

fn duration(item: &WorkItem) -> u64 {
    item.duration_ms.unwrap_or(0)
}

fn band_rect(start_ms: u64, end_ms: u64, duration_ms: u64, rect: DisplayRect) -> DisplayRect {
    if duration_ms == 0 {
        return DisplayRect {
            x: rect.x,
            y: rect.y,
            w: 0.0,
            h: rect.h,
        };
    }
    let x0 = rect.x + (start_ms as f32 / duration_ms as f32) * rect.w;
    let x1 = rect.x + (end_ms as f32 / duration_ms as f32) * rect.w;
    DisplayRect {
        x: x0,
        y: rect.y,
        w: x1 - x0,
        h: rect.h,
    }
}

fn timeline_scene(item: &WorkItem, regions: &[Region], ctx: &RenderContext, video: bool) -> Scene {
    let rect = ctx.viewport.timeline_rect();
    let duration_ms = duration(item);

    let mut scene = Scene::default();
    scene.push(if video {
        SceneNode::FrameStrip { duration_ms, rect }
    } else {
        SceneNode::Waveform { duration_ms, rect }
    });

    for region in regions {
        if let Shape::TimeRange { start_ms, end_ms } = region.shape {
            scene.push(SceneNode::TimeBand {
                id: region.id,
                rect: band_rect(start_ms, end_ms, duration_ms, rect),
                label: region.label.clone(),
                selected: ctx.selection == Some(region.id),
            });
        }
    }

    if let Some(Shape::TimeRange { start_ms, end_ms }) = ctx.preview {
        scene.push(SceneNode::PreviewRect {
            rect: band_rect(start_ms, end_ms, duration_ms, rect),
        });
    }

    scene
}

fn map_pointer_to_time(
    gesture: RawGesture,
    item: &WorkItem,
    viewport: &Viewport,
) -> Option<MappedGesture> {
    let RawGesture::Pointer { x, .. } = gesture else {
        return None;
    };
    let rect = viewport.timeline_rect();
    let dur = duration(item);
    if rect.w <= 0.0 || dur == 0 {
        return None;
    }
    // Left of the origin saturates to 0; past the end is caught by region
    // validation.
    let frac = ((x - rect.x) / rect.w).max(0.0);
    Some(MappedGesture::Time((frac * dur as f32) as u64))
}

impl ModalityRenderer for AudioRenderer {
    fn modality(&self) -> Modality {
        Modality::Audio
    }

    fn render(&self, item: &WorkItem, regions: &[Region], ctx: &RenderContext) -> Scene {
        timeline_scene(item, regions, ctx, false)
    }

    fn map_gesture(
        &self,
        gesture: RawGesture,
        item: &WorkItem,
        viewport: &Viewport,
    ) -> Option<MappedGesture> {
        map_pointer_to_time(gesture, item, viewport)
    }
}

impl ModalityRenderer for VideoRenderer {
    fn modality(&self) -> Modality {
        Modality::Video
    }

    fn render(&self, item: &WorkItem, regions: &[Region], ctx: &RenderContext) -> Scene {
        timeline_scene(item, regions, ctx, true)
    }

    fn map_gesture(
        &self,
        gesture: RawGesture,
        item: &WorkItem,
        viewport: &Viewport,
    ) -> Option<MappedGesture> {
        map_pointer_to_time(gesture, item, viewport)
    }
}
