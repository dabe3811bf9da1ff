//! tiny-skia implementation of the drawing surface.

use crate::text::Fonts;
use inkslate_core::{FontFamily, ImageData, ShapeKind, ShapeStyle, Surface};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use std::sync::Arc;
use thiserror::Error;
use tiny_skia::{
    BlendMode, ColorU8, FillRule, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap,
    PixmapPaint, Stroke, Transform,
};

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Font could not be loaded: {0}")]
    Font(String),
}

/// Immutable copy of the canvas pixels, cheap to clone.
#[derive(Debug, Clone)]
pub struct CanvasSnapshot(Arc<Pixmap>);

impl CanvasSnapshot {
    pub fn pixmap(&self) -> &Pixmap {
        &self.0
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }
}

/// Canvas backed by a premultiplied RGBA pixmap.
///
/// Cleared pixels are fully transparent; the shell paints the paper
/// colour underneath.
#[derive(Debug)]
pub struct RasterSurface {
    pixmap: Pixmap,
    fonts: Fonts,
    /// Premultiplied copy of the last composited image, reused while the
    /// same image is dragged or resized.
    image_cache: Option<(ImageData, Pixmap)>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            fonts: Fonts::load()?,
            image_cache: None,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn fill_paint(color: Color) -> Paint<'static> {
        let rgba = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
        paint.anti_alias = true;
        paint
    }

    fn stroke(width: f64) -> Stroke {
        Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        }
    }
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    let rect = rect.abs();
    tiny_skia::Rect::from_ltrb(rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32)
}

/// Convert straight RGBA8 into a premultiplied pixmap.
fn image_pixmap(image: &ImageData) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width, image.height)?;
    for (dst, src) in pixmap
        .pixels_mut()
        .iter_mut()
        .zip(image.pixels().chunks_exact(4))
    {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Some(pixmap)
}

impl Surface for RasterSurface {
    type Snapshot = CanvasSnapshot;

    fn size(&self) -> Size {
        Size::new(self.pixmap.width() as f64, self.pixmap.height() as f64)
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn draw_stroke(&mut self, points: &[Point], color: Color, width: f64) {
        let mut pb = PathBuilder::new();
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        pb.move_to(first.x as f32, first.y as f32);
        if rest.is_empty() {
            // A single point still leaves a round dot.
            pb.line_to(first.x as f32, first.y as f32);
        }
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        if let Some(path) = pb.finish() {
            self.pixmap.stroke_path(
                &path,
                &Self::fill_paint(color),
                &Self::stroke(width),
                Transform::identity(),
                None,
            );
        }
    }

    fn draw_shape(&mut self, kind: ShapeKind, p1: Point, p2: Point, style: &ShapeStyle) {
        let path = match kind {
            ShapeKind::Line => {
                let mut pb = PathBuilder::new();
                pb.move_to(p1.x as f32, p1.y as f32);
                pb.line_to(p2.x as f32, p2.y as f32);
                pb.finish()
            }
            ShapeKind::Rectangle => to_skia_rect(kind.bounds(p1, p2)).map(PathBuilder::from_rect),
            ShapeKind::Circle => {
                PathBuilder::from_circle(p1.x as f32, p1.y as f32, p1.distance(p2) as f32)
            }
        };
        let Some(path) = path else {
            return;
        };

        if let Some(fill) = style.fill_color.filter(|_| kind != ShapeKind::Line) {
            self.pixmap.fill_path(
                &path,
                &Self::fill_paint(fill),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
        self.pixmap.stroke_path(
            &path,
            &Self::fill_paint(style.stroke_color),
            &Self::stroke(style.stroke_width),
            Transform::identity(),
            None,
        );
    }

    fn draw_text(&mut self, text: &str, position: Point, font: FontFamily, size: f64, color: Color) {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let Some(mask) = self
            .fonts
            .coverage_mask(text, position, font, size, width, height)
        else {
            return;
        };
        if let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, width as f32, height as f32) {
            self.pixmap
                .fill_rect(rect, &Self::fill_paint(color), Transform::identity(), Some(&mask));
        }
    }

    fn erase_region(&mut self, center: Point, size: f64) {
        let half = size / 2.0;
        let Some(rect) = to_skia_rect(Rect::new(
            center.x - half,
            center.y - half,
            center.x + half,
            center.y + half,
        )) else {
            return;
        };
        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        paint.anti_alias = false;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn composite_image(&mut self, image: &ImageData, rect: Rect) {
        let cached = matches!(&self.image_cache, Some((data, _)) if data.same_pixels(image));
        if !cached {
            let Some(converted) = image_pixmap(image) else {
                return;
            };
            self.image_cache = Some((image.clone(), converted));
        }
        let Some((_, source)) = self.image_cache.as_ref() else {
            return;
        };
        let rect = rect.abs();
        let sx = rect.width() / image.width as f64;
        let sy = rect.height() / image.height as f64;
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            Transform::from_row(sx as f32, 0.0, 0.0, sy as f32, rect.x0 as f32, rect.y0 as f32),
            None,
        );
    }

    fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot(Arc::new(self.pixmap.clone()))
    }

    fn restore(&mut self, snapshot: &CanvasSnapshot) {
        if snapshot.0.width() == self.pixmap.width() && snapshot.0.height() == self.pixmap.height() {
            self.pixmap.data_mut().copy_from_slice(snapshot.0.data());
        } else {
            log::warn!(
                "Snapshot size {}x{} does not match canvas {}x{}",
                snapshot.0.width(),
                snapshot.0.height(),
                self.pixmap.width(),
                self.pixmap.height()
            );
            self.pixmap = (*snapshot.0).clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> RasterSurface {
        RasterSurface::new(100, 80).unwrap()
    }

    fn alpha_at(surface: &RasterSurface, x: u32, y: u32) -> u8 {
        surface.pixmap().pixel(x, y).unwrap().alpha()
    }

    fn style(fill: Option<Color>) -> ShapeStyle {
        ShapeStyle {
            stroke_color: Color::BLACK,
            stroke_width: 2.0,
            fill_color: fill,
        }
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(
            RasterSurface::new(0, 10),
            Err(RenderError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_stroke_marks_pixels() {
        let mut s = surface();
        s.draw_stroke(&[Point::new(10.0, 10.0), Point::new(60.0, 10.0)], Color::BLACK, 4.0);
        assert_eq!(alpha_at(&s, 30, 10), 255);
        assert_eq!(alpha_at(&s, 30, 40), 0);
    }

    #[test]
    fn test_outline_rectangle_leaves_interior_clear() {
        let mut s = surface();
        s.draw_shape(ShapeKind::Rectangle, Point::new(60.0, 60.0), Point::new(10.0, 10.0), &style(None));
        assert_eq!(alpha_at(&s, 10, 35), 255);
        assert_eq!(alpha_at(&s, 35, 35), 0);
    }

    #[test]
    fn test_filled_circle_covers_center() {
        let mut s = surface();
        s.draw_shape(
            ShapeKind::Circle,
            Point::new(40.0, 40.0),
            Point::new(60.0, 40.0),
            &style(Some(Color::WHITE)),
        );
        assert_eq!(alpha_at(&s, 40, 40), 255);
        assert_eq!(alpha_at(&s, 40, 5), 0);
    }

    #[test]
    fn test_erase_clears_square() {
        let mut s = surface();
        s.draw_shape(
            ShapeKind::Rectangle,
            Point::new(0.0, 0.0),
            Point::new(100.0, 80.0),
            &style(Some(Color::BLACK)),
        );
        s.erase_region(Point::new(50.0, 40.0), 10.0);
        assert_eq!(alpha_at(&s, 50, 40), 0);
        assert_eq!(alpha_at(&s, 46, 36), 0);
        assert_eq!(alpha_at(&s, 60, 40), 255);
    }

    #[test]
    fn test_composite_scales_into_rect() {
        let mut s = surface();
        let red = ImageData::new(2, 2, [255, 0, 0, 255].repeat(4)).unwrap();
        s.composite_image(&red, Rect::new(20.0, 20.0, 40.0, 30.0));
        let px = s.pixmap().pixel(30, 25).unwrap();
        assert_eq!((px.red(), px.alpha()), (255, 255));
        assert_eq!(alpha_at(&s, 45, 25), 0);
    }

    #[test]
    fn test_composite_reuses_converted_image() {
        let mut s = surface();
        let red = ImageData::new(2, 2, [255, 0, 0, 255].repeat(4)).unwrap();
        let blue = ImageData::new(2, 2, [0, 0, 255, 255].repeat(4)).unwrap();

        s.composite_image(&red, Rect::new(0.0, 0.0, 10.0, 10.0));
        let first = s.image_cache.as_ref().map(|(_, p)| p.data().as_ptr());
        s.composite_image(&red.clone(), Rect::new(10.0, 10.0, 30.0, 30.0));
        let second = s.image_cache.as_ref().map(|(_, p)| p.data().as_ptr());
        assert_eq!(first, second);
        assert_eq!(s.pixmap().pixel(20, 20).unwrap().red(), 255);

        s.composite_image(&blue, Rect::new(40.0, 40.0, 50.0, 50.0));
        assert!(s.image_cache.as_ref().is_some_and(|(data, _)| data.same_pixels(&blue)));
        assert_eq!(s.pixmap().pixel(45, 45).unwrap().blue(), 255);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut s = surface();
        let blank = s.snapshot();
        s.draw_stroke(&[Point::new(0.0, 0.0), Point::new(99.0, 79.0)], Color::BLACK, 3.0);
        let drawn = s.snapshot();
        s.restore(&blank);
        assert!(s.data().iter().all(|&b| b == 0));
        s.restore(&drawn);
        assert_eq!(s.data(), drawn.pixmap().data());
    }

    #[test]
    fn test_text_draws_pixels() {
        let mut s = surface();
        s.draw_text("NGOLA", Point::new(5.0, 50.0), FontFamily::Arial, 24.0, Color::BLACK);
        assert!(s.pixmap().pixels().iter().any(|p| p.alpha() > 0));
    }
}
