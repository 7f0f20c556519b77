//! Code renderer: text spans with a line-number gutter.

use crate::region::{Modality, Region};
use crate::render::scene::Scene;
use crate::render::text::{map_selection, span_scene};
use crate::render::{MappedGesture, ModalityRenderer, RawGesture, RenderContext, Viewport};
use crate::task::WorkItem;

pub struct CodeRenderer;

impl ModalityRenderer for CodeRenderer {
    fn modality(&self) -> Modality {
        Modality::Code
    }

    fn render(&self, item: &WorkItem, regions: &[Region], ctx: &RenderContext) -> Scene {
        span_scene(item, regions, ctx, true)
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
