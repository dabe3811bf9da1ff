//! In-memory surface that records draw calls, for tests.

use crate::surface::{ImageData, ShapeKind, ShapeStyle, Surface};
use crate::tools::FontFamily;
use kurbo::{Point, Rect, Size};
use peniko::Color;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Stroke {
        points: Vec<Point>,
        width: f64,
    },
    Shape {
        kind: ShapeKind,
        p1: Point,
        p2: Point,
        stroke_width: f64,
        filled: bool,
    },
    Text {
        text: String,
        position: Point,
        size: f64,
    },
    Erase {
        center: Point,
        size: f64,
    },
    Image {
        rect: Rect,
    },
}

/// Surface whose "pixels" are the list of operations drawn since the last
/// clear or restore.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
    restores: usize,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            ops: Vec::new(),
            restores: 0,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of `restore` calls so far.
    pub fn restores(&self) -> usize {
        self.restores
    }
}

impl Surface for RecordingSurface {
    type Snapshot = Vec<DrawOp>;

    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.ops.clear();
    }

    fn draw_stroke(&mut self, points: &[Point], _color: Color, width: f64) {
        self.ops.push(DrawOp::Stroke {
            points: points.to_vec(),
            width,
        });
    }

    fn draw_shape(&mut self, kind: ShapeKind, p1: Point, p2: Point, style: &ShapeStyle) {
        self.ops.push(DrawOp::Shape {
            kind,
            p1,
            p2,
            stroke_width: style.stroke_width,
            filled: style.fill_color.is_some(),
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, _font: FontFamily, size: f64, _color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            position,
            size,
        });
    }

    fn erase_region(&mut self, center: Point, size: f64) {
        self.ops.push(DrawOp::Erase { center, size });
    }

    fn composite_image(&mut self, _image: &ImageData, rect: Rect) {
        self.ops.push(DrawOp::Image { rect });
    }

    fn snapshot(&self) -> Vec<DrawOp> {
        self.ops.clone()
    }

    fn restore(&mut self, snapshot: &Vec<DrawOp>) {
        self.ops = snapshot.clone();
        self.restores += 1;
    }
}
