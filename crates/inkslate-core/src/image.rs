//! The live image placed with the image tool.

use crate::handles::ResizeDirection;
use crate::surface::ImageData;
use kurbo::{Point, Rect, Size, Vec2};

/// Fraction of the source width used for a freshly placed image.
const PLACEMENT_SCALE: f64 = 0.25;
/// Widest a freshly placed image may be.
const MAX_PLACEMENT_WIDTH: f64 = 200.0;

/// An image positioned on the canvas that can still be dragged and resized.
#[derive(Debug, Clone)]
pub struct PlacedImage {
    /// Decoded pixels.
    pub source: ImageData,
    /// Top-left corner position.
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
}

impl PlacedImage {
    /// Scale a newly opened image and position it around `at`.
    ///
    /// The display width is a quarter of the source width, capped at 200,
    /// with the height following the source aspect ratio. The image is
    /// centred on `at`, or on the canvas when `at` is the origin.
    pub fn place(source: ImageData, at: Point, canvas: Size) -> Self {
        let source_width = source.width as f64;
        let width = (source_width * PLACEMENT_SCALE).min(MAX_PLACEMENT_WIDTH);
        let height = source.height as f64 * (width / source_width);

        let position = if at == Point::ZERO {
            Point::new((canvas.width - width) / 2.0, (canvas.height - height) / 2.0)
        } else {
            Point::new(at.x - width / 2.0, at.y - height / 2.0)
        };

        Self {
            source,
            position,
            width,
            height,
        }
    }

    /// Get the bounding rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Whether `point` lies inside the image (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.width
            && point.y >= self.position.y
            && point.y <= self.position.y + self.height
    }

    /// Move the top-left corner so the grab point stays under the pointer.
    pub fn drag_to(&mut self, pointer: Point, grab_offset: Vec2) {
        self.position = pointer - grab_offset;
    }

    /// Apply a pointer delta to the edges named by `direction`, then clamp
    /// both dimensions to `min_size`.
    ///
    /// Clamping keeps the opposite edge fixed, so dragging the left or top
    /// edge past the minimum stops the image instead of sliding it.
    pub fn resize(&mut self, direction: ResizeDirection, delta: Vec2, min_size: f64) {
        let right = self.position.x + self.width;
        let bottom = self.position.y + self.height;

        if direction.moves_left() {
            self.width -= delta.x;
            self.position.x += delta.x;
        } else if direction.moves_right() {
            self.width += delta.x;
        }
        if direction.moves_top() {
            self.height -= delta.y;
            self.position.y += delta.y;
        } else if direction.moves_bottom() {
            self.height += delta.y;
        }

        if self.width < min_size {
            self.width = min_size;
            if direction.moves_left() {
                self.position.x = right - min_size;
            }
        }
        if self.height < min_size {
            self.height = min_size;
            if direction.moves_top() {
                self.position.y = bottom - min_size;
            }
        }
    }
}
