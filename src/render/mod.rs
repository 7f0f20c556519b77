//! Modality renderers.
//!
//! One renderer per data type, all behind the same two-way contract: a pure
//! `render` from the item plus regions to a display list, and the inverse
//! mapping from raw viewport gestures back to workspace coordinates.
//! Renderers never write to the store; they hand mapped gestures to the tool
//! controller, which is the single writer.
//!
//! Selection is a capability-keyed dispatch table (`Modality -> renderer`),
//! not inheritance: the only shared behavior is this contract.

mod code;
mod image;
pub mod scene;
mod spatial;
mod text;
mod timeline;
mod viewport;

use std::collections::HashMap;

pub use code::CodeRenderer;
pub use image::ImageRenderer;
pub use scene::{DisplayPoint, DisplayRect, Scene, SceneNode};
pub use spatial::SpatialRenderer;
pub use text::TextRenderer;
pub use timeline::{AudioRenderer, VideoRenderer};
pub use viewport::Viewport;

use crate::geometry::{Point, Point3, Shape};
use crate::region::{Modality, Region, RegionId};
use crate::task::WorkItem;

/// Read-only inputs to a render pass beyond the item and regions.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub viewport: Viewport,
    /// Region currently selected for attribute editing.
    pub selection: Option<RegionId>,
    /// In-progress gesture shape reported by the tool controller.
    pub preview: Option<Shape>,
}

impl RenderContext {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            selection: None,
            preview: None,
        }
    }
}

/// A raw input event in viewport terms, before coordinate mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawGesture {
    /// Pointer position in viewport pixels.
    Pointer { x: f32, y: f32 },
    /// Native text selection, in character offsets into the document.
    Selection { start: usize, end: usize },
    /// A 3D pick: viewport position plus a depth fraction along the camera
    /// ray, both normalized by the host's camera.
    SpatialPick { x: f32, y: f32, depth: f32 },
}

/// A gesture mapped into workspace coordinates for the tool controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MappedGesture {
    /// Normalized point on the content plane.
    Plane(Point),
    /// Character range into the document.
    Offsets { start: usize, end: usize },
    /// Millisecond position on the media timeline.
    Time(u64),
    /// Normalized point in the 3D scene.
    Space(Point3),
}

/// The per-modality rendering contract.
pub trait ModalityRenderer {
    fn modality(&self) -> Modality;

    /// Convert the item and its regions into a display list. Pure and
    /// one-directional.
    fn render(&self, item: &WorkItem, regions: &[Region], ctx: &RenderContext) -> Scene;

    /// Map a raw gesture back into workspace coordinates, accounting for
    /// zoom and letterboxing. `None` when the gesture kind is meaningless
    /// for this modality.
    fn map_gesture(&self, gesture: RawGesture, item: &WorkItem, viewport: &Viewport)
        -> Option<MappedGesture>;
}

/// Capability-keyed renderer table.
pub struct RendererRegistry {
    renderers: HashMap<Modality, Box<dyn ModalityRenderer>>,
}

impl RendererRegistry {
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registry with the built-in renderer for every modality.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(ImageRenderer));
        registry.register(Box::new(TextRenderer));
        registry.register(Box::new(CodeRenderer));
        registry.register(Box::new(AudioRenderer));
        registry.register(Box::new(VideoRenderer));
        registry.register(Box::new(SpatialRenderer));
        registry
    }

    /// Register or replace the renderer for its modality.
    pub fn register(&mut self, renderer: Box<dyn ModalityRenderer>) {
        self.renderers.insert(renderer.modality(), renderer);
    }

    pub fn get(&self, modality: Modality) -> Option<&dyn ModalityRenderer> {
        self.renderers.get(&modality).map(|r| r.as_ref())
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_every_modality() {
        let registry = RendererRegistry::with_defaults();
        for m in [
            Modality::Text,
            Modality::Image,
            Modality::Audio,
            Modality::Video,
            Modality::Code,
            Modality::ThreeD,
        ] {
            let renderer = registry.get(m).expect("missing renderer");
            assert_eq!(renderer.modality(), m);
        }
    }
}
