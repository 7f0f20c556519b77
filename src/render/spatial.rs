//! 3D renderer: anchors in a normalized scene cube.
//!
//! The host's camera reduces a click to a viewport position plus a depth
//! fraction along the pick ray; this renderer turns that into a normalized
//! anchor position. Anchors render as projected markers carrying their depth
//! so the host can scale or occlude them.

use crate::geometry::{Point, Point3, Shape};
use crate::region::{Modality, Region};
use crate::render::scene::{Scene, SceneNode};
use crate::render::{MappedGesture, ModalityRenderer, RawGesture, RenderContext, Viewport};
use crate::task::{ItemContent, WorkItem};

pub struct SpatialRenderer;

fn scene_source(item: &WorkItem) -> String {
    match &item.content {
        ItemContent::Url(url) => url.clone(),
        ItemContent::Payload(v) => v
            .get("scene")
            .and_then(|s| s.as_str())
            .unwrap_or_default()
            .to_string(),
        ItemContent::Text(_) => String::new(),
    }
}

impl ModalityRenderer for SpatialRenderer {
    fn modality(&self) -> Modality {
        Modality::ThreeD
    }

    fn render(&self, item: &WorkItem, regions: &[Region], ctx: &RenderContext) -> Scene {
        let vp = ctx.viewport;
        let full = vp.content_rect(vp.width, vp.height);

        let mut scene = Scene::default();
        scene.push(SceneNode::SceneView {
            source: scene_source(item),
        });

        for region in regions {
            if let Shape::Anchor3d { x, y, z } = region.shape {
                scene.push(SceneNode::Marker3d {
                    id: region.id,
                    at: vp.to_display(full, Point::new(x, y)),
                    depth: z,
                    label: region.label.clone(),
                    selected: ctx.selection == Some(region.id),
                });
            }
        }

        scene
    }

    fn map_gesture(
        &self,
        gesture: RawGesture,
        _item: &WorkItem,
        viewport: &Viewport,
    ) -> Option<MappedGesture> {
        let RawGesture::SpatialPick { x, y, depth } = gesture else {
            return None;
        };
        let full = viewport.content_rect(viewport.width, viewport.height);
        let p = viewport.to_normalized(full, x, y)?;
        Some(MappedGesture::Space(Point3::new(p.x, p.y, depth)))
    }
}
