//! Canvas widget: shows the raster surface and turns egui pointer input
//! into [`PointerEvent`]s.

use crate::theme::Theme;
use eframe::egui::{
    self, Color32, ColorImage, Pos2, Sense, Stroke, StrokeKind, TextureHandle, TextureOptions, Vec2,
};
use inkslate_core::{PointerEvent, WhiteboardSession};
use inkslate_render::RasterSurface;
use kurbo::Point;

/// Texture cache and pointer tracking for the canvas.
#[derive(Default)]
pub struct CanvasView {
    texture: Option<TextureHandle>,
    dirty: bool,
    /// Primary button went down over the canvas and has not been released.
    pointer_active: bool,
    last_pos: Option<Pos2>,
}

impl CanvasView {
    /// Re-upload the surface on the next frame.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn upload(&mut self, ctx: &egui::Context, surface: &RasterSurface) {
        if self.texture.is_some() && !self.dirty {
            return;
        }
        let size = [surface.width() as usize, surface.height() as usize];
        let image = ColorImage::from_rgba_premultiplied(size, surface.data());
        match self.texture.as_mut() {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::LINEAR)),
        }
        self.dirty = false;
    }

    /// Paint the canvas and collect this frame's pointer events.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        session: &WhiteboardSession<RasterSurface>,
        theme: &Theme,
        show_handles: bool,
    ) -> Vec<PointerEvent> {
        let surface = session.surface();
        self.upload(ui.ctx(), surface);

        let size = Vec2::new(surface.width() as f32, surface.height() as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, theme.canvas_color());
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, theme.border_color()), StrokeKind::Outside);

        if show_handles {
            if let Some(image) = session.placed_image() {
                let bounds = image.bounds();
                let outline = egui::Rect::from_min_max(
                    rect.min + Vec2::new(bounds.x0 as f32, bounds.y0 as f32),
                    rect.min + Vec2::new(bounds.x1 as f32, bounds.y1 as f32),
                );
                let stroke = Stroke::new(1.0, theme.handle_stroke_color());
                painter.rect_stroke(outline, 0.0, stroke, StrokeKind::Middle);
                for handle in session.image_handles().into_iter().flatten() {
                    let r = handle.rect;
                    let handle_rect = egui::Rect::from_min_max(
                        rect.min + Vec2::new(r.x0 as f32, r.y0 as f32),
                        rect.min + Vec2::new(r.x1 as f32, r.y1 as f32),
                    );
                    painter.rect_filled(handle_rect, 0.0, theme.handle_fill_color());
                    painter.rect_stroke(handle_rect, 0.0, stroke, StrokeKind::Inside);
                }
            }
        }

        self.pointer_events(ui.ctx(), &response, rect.min)
    }

    fn pointer_events(
        &mut self,
        ctx: &egui::Context,
        response: &egui::Response,
        origin: Pos2,
    ) -> Vec<PointerEvent> {
        let to_canvas = |pos: Pos2| Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64);
        let (pressed, released, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });

        let mut events = Vec::new();
        let Some(pos) = pos else {
            return events;
        };

        if pressed && response.hovered() {
            self.pointer_active = true;
            self.last_pos = Some(pos);
            events.push(PointerEvent::Pressed(to_canvas(pos)));
        } else if self.pointer_active && self.last_pos != Some(pos) {
            self.last_pos = Some(pos);
            events.push(PointerEvent::Dragged(to_canvas(pos)));
        }

        if released && self.pointer_active {
            self.pointer_active = false;
            self.last_pos = None;
            events.push(PointerEvent::Released(to_canvas(pos)));
        }
        events
    }
}
