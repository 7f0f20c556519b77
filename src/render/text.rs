//! Text renderer: spans over an inline document.
//!
//! Workspace coordinates for text are character offsets, so the gesture
//! mapping is nearly the identity: the host reports the native selection
//! range and this renderer clamps it to the document length.

use crate::geometry::Shape;
use crate::region::{Modality, Region};
use crate::render::scene::{Scene, SceneNode};
use crate::render::{MappedGesture, ModalityRenderer, RawGesture, RenderContext, Viewport};
use crate::task::{ItemContent, WorkItem};

pub struct TextRenderer;

pub(crate) fn document_text(item: &WorkItem) -> &str {
    match &item.content {
        ItemContent::Text(text) => text,
        _ => "",
    }
}

pub(crate) fn span_scene(item: &WorkItem, regions: &[Region], ctx: &RenderContext, gutter: bool) -> Scene {
    let mut scene = Scene::default();
    scene.push(SceneNode::TextBlock {
        text: document_text(item).to_string(),
        gutter,
    });
    for region in regions {
        if let Shape::TextSpan { start, end } = region.shape {
            scene.push(SceneNode::SpanHighlight {
                id: region.id,
                start,
                end,
                label: region.label.clone(),
                selected: ctx.selection == Some(region.id),
            });
        }
    }
    scene
}

pub(crate) fn map_selection(item: &WorkItem, gesture: RawGesture) -> Option<MappedGesture> {
    let RawGesture::Selection { start, end } = gesture else {
        return None;
    };
    // Native selections are already in document offsets; clamp to length.
    let len = document_text(item).chars().count();
    Some(MappedGesture::Offsets {
        start: start.min(len),
        end: end.min(len),
    })
}

impl ModalityRenderer for TextRenderer {
    fn modality(&self) -> Modality {
        Modality::Text
    }

    fn render(&self, item: &WorkItem, regions: &[Region], ctx: &RenderContext) -> Scene {
        span_scene(item, regions, ctx, false)
    }

    fn map_gesture(
        &self,
        gesture: RawGesture,
        item: &WorkItem,
        _viewport: &Viewport,
    ) -> Option<MappedGesture> {
        map_selection(item, gesture)
    }
}
