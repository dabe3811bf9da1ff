//! Optional visual theme loaded from a JSON resource.

use eframe::egui::{self, Color32};
use inkslate_core::WhiteboardError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Colours and visuals for the main window.
///
/// Every field is optional in the file; missing ones keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub dark_mode: bool,
    /// Toolbar and window background, RGBA.
    pub panel_background: [u8; 4],
    /// Paper colour under the transparent canvas.
    pub canvas_background: [u8; 4],
    /// Border around the canvas.
    pub canvas_border: [u8; 4],
    pub handle_fill: [u8; 4],
    pub handle_stroke: [u8; 4],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            dark_mode: false,
            panel_background: [240, 240, 240, 255],
            canvas_background: [255, 255, 255, 255],
            canvas_border: [180, 180, 180, 255],
            handle_fill: [255, 255, 255, 255],
            handle_stroke: [59, 130, 246, 255],
        }
    }
}

fn color(rgba: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3])
}

impl Theme {
    /// Read a theme file.
    ///
    /// A missing or unreadable file is reported as
    /// [`WhiteboardError::ResourceMissing`].
    pub fn load(path: &Path) -> Result<Self, WhiteboardError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| WhiteboardError::ResourceMissing(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| WhiteboardError::ResourceMissing(format!("{}: {e}", path.display())))
    }

    /// Load `path` if given, falling back to the default theme with a warning.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(theme) => {
                log::info!("Loaded theme from {}", path.display());
                theme
            }
            Err(e) => {
                log::warn!("{e}; using default styling");
                Self::default()
            }
        }
    }

    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.panel_fill = self.panel_color();
        visuals.window_fill = self.panel_color();
        ctx.set_visuals(visuals);
    }

    pub fn panel_color(&self) -> Color32 {
        color(self.panel_background)
    }

    pub fn canvas_color(&self) -> Color32 {
        color(self.canvas_background)
    }

    pub fn border_color(&self) -> Color32 {
        color(self.canvas_border)
    }

    pub fn handle_fill_color(&self) -> Color32 {
        color(self.handle_fill)
    }

    pub fn handle_stroke_color(&self) -> Color32 {
        color(self.handle_stroke)
    }
}
