//! Image renderer: the reference implementation of the renderer contract.
//!
//! The image is letterboxed into the viewport and scaled by zoom; regions are
//! projected from normalized coordinates into the resulting rect, and raw
//! pointer positions are mapped back through the inverse transform.

use crate::geometry::{Point, Shape};
use crate::region::{Modality, Region};
use crate::render::scene::{DisplayRect, Scene, SceneNode};
use crate::render::{MappedGesture, ModalityRenderer, RawGesture, RenderContext, Viewport};
use crate::task::{ItemContent, WorkItem};

pub struct ImageRenderer;

fn content_size(item: &WorkItem) -> (f32, f32) {
    match item.pixel_size {
        Some((w, h)) => (w as f32, h as f32),
        None => (1.0, 1.0),
    }
}

fn content_source(item: &WorkItem) -> String {
    match &item.content {
        ItemContent::Url(url) => url.clone(),
        _ => String::new(),
    }
}

fn project_shape(
    shape: &Shape,
    rect: DisplayRect,
    vp: &Viewport,
    id: crate::region::RegionId,
    label: &str,
    selected: bool,
) -> Option<SceneNode> {
    match shape {
        Shape::BoundingBox { x, y, w, h } => {
            let tl = vp.to_display(rect, Point::new(*x, *y));
            Some(SceneNode::RegionRect {
                id,
                rect: DisplayRect {
                    x: tl.x,
                    y: tl.y,
                    w: w * rect.w,
                    h: h * rect.h,
                },
                label: label.to_string(),
                selected,
            })
        }
        Shape::Polygon { points } => Some(SceneNode::RegionPath {
            id,
            points: points.iter().map(|p| vp.to_display(rect, *p)).collect(),
            label: label.to_string(),
            selected,
        }),
        _ => None,
    }
}

impl ModalityRenderer for ImageRenderer {
    fn modality(&self) -> Modality {
        Modality::Image
    }

    fn render(&self, item: &WorkItem, regions: &[Region], ctx: &RenderContext) -> Scene {
        let (cw, ch) = content_size(item);
        let rect = ctx.viewport.content_rect(cw, ch);

        let mut scene = Scene::default();
        scene.push(SceneNode::Raster {
            source: content_source(item),
            rect,
        });

        for region in regions {
            let selected = ctx.selection == Some(region.id);
            if let Some(node) = project_shape(
                &region.shape,
                rect,
                &ctx.viewport,
                region.id,
                &region.label,
                selected,
            ) {
                scene.push(node);
            }
        }

        match &ctx.preview {
            Some(Shape::BoundingBox { x, y, w, h }) => {
                let tl = ctx.viewport.to_display(rect, Point::new(*x, *y));
                scene.push(SceneNode::PreviewRect {
                    rect: DisplayRect {
                        x: tl.x,
                        y: tl.y,
                        w: w * rect.w,
                        h: h * rect.h,
                    },
                });
            }
            Some(Shape::Polygon { points }) => {
                scene.push(SceneNode::PreviewPath {
                    points: points
                        .iter()
                        .map(|p| ctx.viewport.to_display(rect, *p))
                        .collect(),
                });
            }
            _ => {}
        }

        scene
    }

    fn map_gesture(
        &self,
        gesture: RawGesture,
        item: &WorkItem,
        viewport: &Viewport,
    ) -> Option<MappedGesture> {
        let RawGesture::Pointer { x, y } = gesture else {
            return None;
        };
        let (cw, ch) = content_size(item);
        let rect = viewport.content_rect(cw, ch);
        viewport.to_normalized(rect, x, y).map(MappedGesture::Plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_item() -> WorkItem {
        let mut item = WorkItem::new("img-1", ItemContent::Url("frames/0001.jpg".into()));
        item.pixel_size = Some((1600, 800));
        item
    }

    #[test]
    fn regions_project_into_the_letterboxed_rect() {
        let item = image_item();
        let regions = vec![Region {
            id: 7,
            item_id: item.id.clone(),
            shape: Shape::BoundingBox {
                x: 0.25,
                y: 0.5,
                w: 0.5,
                h: 0.25,
            },
            label: "car".into(),
            confidence: None,
            attributes: Default::default(),
        }];
        let ctx = RenderContext::new(Viewport::new(800.0, 600.0));
        let scene = ImageRenderer.render(&item, &regions, &ctx);

        // Content rect is 800x400 at y=100.
        let Some(SceneNode::RegionRect { rect, .. }) = scene
            .nodes
            .iter()
            .find(|n| matches!(n, SceneNode::RegionRect { .. }))
        else {
            panic!("no region node");
        };
        assert!((rect.x - 200.0).abs() < 1e-3);
        assert!((rect.y - 300.0).abs() < 1e-3);
        assert!((rect.w - 400.0).abs() < 1e-3);
        assert!((rect.h - 100.0).abs() < 1e-3);
    }

    #[test]
    fn pointer_maps_through_the_inverse_transform() {
        let item = image_item();
        let vp = Viewport::new(800.0, 600.0);
        let mapped = ImageRenderer
            .map_gesture(RawGesture::Pointer { x: 400.0, y: 300.0 }, &item, &vp)
            .unwrap();
        let MappedGesture::Plane(p) = mapped else {
            panic!("wrong mapping kind");
        };
        assert!((p.x - 0.5).abs() < 1e-4);
        assert!((p.y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn selection_gestures_mean_nothing_to_images() {
        let item = image_item();
        let vp = Viewport::new(800.0, 600.0);
        assert!(ImageRenderer
            .map_gesture(RawGesture::Selection { start: 0, end: 4 }, &item, &vp)
            .is_none());
    }

    #[test]
    fn preview_rect_follows_the_gesture_shape() {
        let item = image_item();
        let mut ctx = RenderContext::new(Viewport::new(800.0, 600.0));
        ctx.preview = Some(Shape::BoundingBox {
            x: 0.0,
            y: 0.0,
            w: 0.1,
            h: 0.1,
        });
        let scene = ImageRenderer.render(&item, &[], &ctx);
        assert!(scene
            .nodes
            .iter()
            .any(|n| matches!(n, SceneNode::PreviewRect { .. })));
    }
}
