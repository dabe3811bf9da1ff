//! Drawing surface abstraction.
//!
//! The session mutates the canvas only through [`Surface`], so the gesture
//! logic stays independent of any particular rasterizer or UI toolkit.

use crate::tools::FontFamily;
use kurbo::{Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shapes drawn between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Straight line from the first point to the second.
    Line,
    /// Axis-aligned rectangle spanned by the two points.
    Rectangle,
    /// Circle centred on the first point passing through the second.
    Circle,
}

impl ShapeKind {
    /// Bounding box of the shape drawn from `p1` to `p2`.
    pub fn bounds(self, p1: Point, p2: Point) -> Rect {
        match self {
            ShapeKind::Line | ShapeKind::Rectangle => Rect::from_points(p1, p2),
            ShapeKind::Circle => {
                let radius = p1.distance(p2);
                Rect::new(p1.x - radius, p1.y - radius, p1.x + radius, p1.y + radius)
            }
        }
    }
}

/// Stroke and fill applied to a shape.
#[derive(Debug, Clone, Copy)]
pub struct ShapeStyle {
    pub stroke_color: Color,
    pub stroke_width: f64,
    /// Fill color (None = outline only).
    pub fill_color: Option<Color>,
}

/// Decoded raster image with straight (non-premultiplied) RGBA8 pixels.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pixels: Arc<[u8]>,
}

impl ImageData {
    /// Wrap RGBA8 pixel data. Returns `None` if the buffer length does not
    /// match the dimensions or either dimension is zero.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if width == 0 || height == 0 || pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Raw RGBA8 pixels, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Whether both values share one pixel buffer, as clones do.
    pub fn same_pixels(&self, other: &ImageData) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// A mutable canvas that gestures draw into.
///
/// All operations apply directly to the pixel buffer; there is no batching.
pub trait Surface {
    /// Immutable full-resolution copy of the pixel buffer.
    type Snapshot: Clone;

    /// Size of the surface in logical units.
    fn size(&self) -> Size;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Stroke a polyline through `points`.
    fn draw_stroke(&mut self, points: &[Point], color: Color, width: f64);

    /// Draw a shape from `p1` to `p2`; the fill is painted before the outline.
    fn draw_shape(&mut self, kind: ShapeKind, p1: Point, p2: Point, style: &ShapeStyle);

    /// Fill `text` with its baseline starting at `position`.
    fn draw_text(&mut self, text: &str, position: Point, font: FontFamily, size: f64, color: Color);

    /// Clear a `size` × `size` square centred on `center`.
    fn erase_region(&mut self, center: Point, size: f64);

    /// Draw `image` scaled into `rect`.
    fn composite_image(&mut self, image: &ImageData, rect: Rect);

    /// Deep copy of the current pixels.
    fn snapshot(&self) -> Self::Snapshot;

    /// Replace every pixel with the contents of `snapshot`.
    fn restore(&mut self, snapshot: &Self::Snapshot);
}
