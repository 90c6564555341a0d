//! Input block types produced by the PDF backend.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in page coordinates (points, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box width.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// Discriminant for what a block contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Glyph runs; the only kind that contributes to reflowed output
    Text,
    /// A raster or vector image
    Image,
    /// Anything else the backend reports (form widgets, paths, ...)
    Other,
}

/// A rectangular region on a page with its raw text content.
///
/// Produced by the backend in reading order (top-to-bottom, left-to-right)
/// and consumed once by the page assembler. The raw text may contain
/// embedded line breaks from the source layout; blocks are never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    /// Position on the page
    pub bbox: BoundingBox,
    /// Raw extracted text, possibly with embedded line breaks
    pub text: String,
    /// What the block contains
    pub kind: BlockKind,
}

impl TextBlock {
    /// Create a text block.
    pub fn text(bbox: BoundingBox, text: impl Into<String>) -> Self {
        Self {
            bbox,
            text: text.into(),
            kind: BlockKind::Text,
        }
    }

    /// Create an image block (no text content).
    pub fn image(bbox: BoundingBox) -> Self {
        Self {
            bbox,
            text: String::new(),
            kind: BlockKind::Image,
        }
    }

    /// Check if this block carries text content.
    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }
}
