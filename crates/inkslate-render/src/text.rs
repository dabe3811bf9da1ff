//! Glyph rasterization for the text tool.

use crate::raster::RenderError;
use ab_glyph::{Font, FontRef, PxScale, ScaleFont, point};
use inkslate_core::FontFamily;
use kurbo::Point;
use tiny_skia::Mask;

/// Fonts bundled with the binary.
///
/// The toolbar families are mapped onto the two faces that ship with egui:
/// monospace families use Hack, everything else Ubuntu Light.
#[derive(Clone)]
pub struct Fonts {
    sans: FontRef<'static>,
    mono: FontRef<'static>,
}

impl Fonts {
    pub fn load() -> Result<Self, RenderError> {
        let sans = FontRef::try_from_slice(epaint_default_fonts::UBUNTU_LIGHT)
            .map_err(|e| RenderError::Font(format!("Ubuntu Light: {e}")))?;
        let mono = FontRef::try_from_slice(epaint_default_fonts::HACK_REGULAR)
            .map_err(|e| RenderError::Font(format!("Hack: {e}")))?;
        Ok(Self { sans, mono })
    }

    pub fn face(&self, family: FontFamily) -> &FontRef<'static> {
        if family.is_monospace() { &self.mono } else { &self.sans }
    }

    /// Rasterize `text` into a coverage mask the size of the canvas.
    ///
    /// `origin` is the start of the baseline. Returns `None` when no glyph
    /// lands on the canvas.
    pub fn coverage_mask(
        &self,
        text: &str,
        origin: Point,
        family: FontFamily,
        size: f64,
        width: u32,
        height: u32,
    ) -> Option<Mask> {
        let mut mask = Mask::new(width, height)?;
        let scaled = self.face(family).as_scaled(PxScale::from(size as f32));
        let stride = width as usize;
        let mut caret = point(origin.x as f32, origin.y as f32);
        let mut touched = false;
        let mut previous = None;

        let data = mask.data_mut();
        for ch in text.chars() {
            let mut glyph = scaled.scaled_glyph(ch);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, glyph.id);
            }
            previous = Some(glyph.id);
            glyph.position = caret;
            caret.x += scaled.h_advance(glyph.id);

            let Some(outlined) = scaled.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, coverage| {
                let px = x as i32 + bounds.min.x as i32;
                let py = y as i32 + bounds.min.y as i32;
                if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                    return;
                }
                let value = (coverage * 255.0).round().clamp(0.0, 255.0) as u8;
                let cell = &mut data[py as usize * stride + px as usize];
                *cell = (*cell).max(value);
                touched |= value > 0;
            });
        }
        touched.then_some(mask)
    }
}

impl std::fmt::Debug for Fonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fonts").finish_non_exhaustive()
    }
}
