//! Region model: modalities, tools, regions and shape validation.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkspaceError};
use crate::geometry::Shape;

/// Identifier of a region within the currently open work item.
///
/// Assigned by the store on insertion, monotonically increasing.
pub type RegionId = u64;

/// The data type a task annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    Text,
    Image,
    Audio,
    Video,
    Code,
    #[serde(rename = "3D")]
    ThreeD,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modality::Text => "TEXT",
            Modality::Image => "IMAGE",
            Modality::Audio => "AUDIO",
            Modality::Video => "VIDEO",
            Modality::Code => "CODE",
            Modality::ThreeD => "3D",
        };
        f.write_str(s)
    }
}

/// An enumerated editing capability, not a class hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    Select,
    CreateBoundingBox,
    CreatePolygon,
    CreateTextSpan,
    CreateTimeRange,
    CreateAnchor3d,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tool::Select => "Select",
            Tool::CreateBoundingBox => "CreateBoundingBox",
            Tool::CreatePolygon => "CreatePolygon",
            Tool::CreateTextSpan => "CreateTextSpan",
            Tool::CreateTimeRange => "CreateTimeRange",
            Tool::CreateAnchor3d => "CreateAnchor3d",
        };
        f.write_str(s)
    }
}

impl Modality {
    /// Static tool compatibility table. `Select` works everywhere; creation
    /// tools are limited to the ones producing a valid shape for the modality.
    pub fn compatible_tools(self) -> &'static [Tool] {
        match self {
            Modality::Text | Modality::Code => &[Tool::Select, Tool::CreateTextSpan],
            Modality::Image => &[
                Tool::Select,
                Tool::CreateBoundingBox,
                Tool::CreatePolygon,
            ],
            Modality::Audio | Modality::Video => &[Tool::Select, Tool::CreateTimeRange],
            Modality::ThreeD => &[Tool::Select, Tool::CreateAnchor3d],
        }
    }

    pub fn allows_tool(self, tool: Tool) -> bool {
        self.compatible_tools().contains(&tool)
    }

    /// Whether a shape variant is legal for this modality.
    pub fn accepts_shape(self, shape: &Shape) -> bool {
        matches!(
            (self, shape),
            (Modality::Text | Modality::Code, Shape::TextSpan { .. })
                | (Modality::Image, Shape::BoundingBox { .. })
                | (Modality::Image, Shape::Polygon { .. })
                | (Modality::Audio | Modality::Video, Shape::TimeRange { .. })
                | (Modality::ThreeD, Shape::Anchor3d { .. })
        )
    }
}

/// Bounds of the content a region must stay inside.
///
/// Derived from the open work item; see [`WorkItem::extent`](crate::task::WorkItem::extent).
/// `usize::MAX` / `u64::MAX` lengths mean the length is unknown and only the
/// lower bound is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentExtent {
    /// Normalized [0,1] x [0,1] plane (images).
    Plane,
    /// Character count of the document (text, code).
    Chars(usize),
    /// Duration in milliseconds (audio, video).
    Millis(u64),
    /// Normalized [0,1]^3 scene (3D).
    Space,
}

/// A single annotation tied to one work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    /// Id of the owning work item.
    pub item_id: String,
    pub shape: Shape,
    /// Label name, drawn from the task's label schema.
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

/// A region as produced by a completed gesture, before the store assigns an
/// id and binds it to the open item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDraft {
    pub shape: Shape,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

impl RegionDraft {
    pub fn new(shape: Shape, label: impl Into<String>) -> Self {
        Self {
            shape,
            label: label.into(),
            confidence: None,
            attributes: HashMap::new(),
        }
    }
}

/// Minimum box side length. Anything thinner is an accidental click, not a
/// region; the tool controller applies a larger, configurable threshold on
/// top of this floor.
pub const MIN_BOX_EXTENT: f32 = 1e-4;

fn in_unit(v: f32) -> bool {
    v.is_finite() && (0.0..=1.0).contains(&v)
}

/// Validate a shape against the task's modality and the content bounds.
///
/// Checks, in order: the shape variant matches the modality, then every
/// coordinate lies inside the content. Spatial coordinates must fall in the
/// normalized [0,1] range; this guards against gestures captured past the
/// edge of a scaled or zoomed canvas. Pure, no side effects.
pub fn validate_shape(shape: &Shape, modality: Modality, extent: ContentExtent) -> Result<()> {
    if !modality.accepts_shape(shape) {
        return Err(WorkspaceError::InvalidShapeForModality {
            shape: shape.name(),
            modality,
        });
    }

    match (shape, extent) {
        (Shape::BoundingBox { x, y, w, h }, ContentExtent::Plane) => {
            if !(in_unit(*x) && in_unit(*y) && in_unit(*w) && in_unit(*h)) {
                return Err(WorkspaceError::OutOfBounds(format!(
                    "box ({x}, {y}, {w}, {h}) has coordinates outside [0,1]"
                )));
            }
            if *x + *w > 1.0 || *y + *h > 1.0 {
                return Err(WorkspaceError::OutOfBounds(format!(
                    "box ({x}, {y}, {w}, {h}) extends past the content edge"
                )));
            }
            if *w < MIN_BOX_EXTENT || *h < MIN_BOX_EXTENT {
                return Err(WorkspaceError::OutOfBounds(format!(
                    "box ({x}, {y}, {w}, {h}) is degenerate"
                )));
            }
        }
        (Shape::Polygon { points }, ContentExtent::Plane) => {
            if points.len() < 3 {
                return Err(WorkspaceError::OutOfBounds(format!(
                    "polygon with {} vertices",
                    points.len()
                )));
            }
            for p in points {
                if !(in_unit(p.x) && in_unit(p.y)) {
                    return Err(WorkspaceError::OutOfBounds(format!(
                        "vertex ({}, {}) outside [0,1]",
                        p.x, p.y
                    )));
                }
            }
        }
        (Shape::TextSpan { start, end }, ContentExtent::Chars(len)) => {
            if start >= end {
                return Err(WorkspaceError::OutOfBounds(format!(
                    "empty span [{start}, {end})"
                )));
            }
            if *end > len {
                return Err(WorkspaceError::OutOfBounds(format!(
                    "span [{start}, {end}) past document length {len}"
                )));
            }
        }
        (Shape::TimeRange { start_ms, end_ms }, ContentExtent::Millis(dur)) => {
            if start_ms >= end_ms {
                return Err(WorkspaceError::OutOfBounds(format!(
                    "empty range [{start_ms}, {end_ms})"
                )));
            }
            if *end_ms > dur {
                return Err(WorkspaceError::OutOfBounds(format!(
                    "range [{start_ms}, {end_ms}) past duration {dur} ms"
                )));
            }
        }
        (Shape::Anchor3d { x, y, z }, ContentExtent::Space) => {
            if !(in_unit(*x) && in_unit(*y) && in_unit(*z)) {
                return Err(WorkspaceError::OutOfBounds(format!(
                    "anchor ({x}, {y}, {z}) outside the unit cube"
                )));
            }
        }
        // Modality check passed but the item's extent disagrees with the
        // shape family; treat as a bounds failure rather than panicking.
        (shape, extent) => {
            return Err(WorkspaceError::OutOfBounds(format!(
                "{} cannot be bounds-checked against {:?}",
                shape.name(),
                extent
            )));
        }
    }

    Ok(())
}

/// Validate a draft region before committing it to the store.
pub fn validate_region(draft: &RegionDraft, modality: Modality, extent: ContentExtent) -> Result<()> {
    validate_shape(&draft.shape, modality, extent)?;
    if let Some(c) = draft.confidence {
        if !c.is_finite() || !(0.0..=1.0).contains(&c) {
            return Err(WorkspaceError::OutOfBounds(format!(
                "confidence {c} outside [0,1]"
            )));
        }
    }
    Ok(())
}
