//! Toolbar built with egui.

use eframe::egui::{self, Color32, Context};
use inkslate_core::tools::{MAX_TOOL_SIZE, MIN_TOOL_SIZE};
use inkslate_core::{FontFamily, MediaKind, ToolConfiguration, ToolKind};
use peniko::Color;

/// Commands triggered from the toolbar or keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Undo,
    Redo,
    /// Blank the canvas and reset history.
    Clear,
    /// Save the committed canvas to an image file.
    Save,
    /// Open an audio or video file in its own window.
    OpenMedia(MediaKind),
}

/// Toolbar state; the tool configuration handed to every pointer event.
#[derive(Debug, Clone)]
pub struct UiState {
    pub tools: ToolConfiguration,
    /// Fill colour remembered while the fill checkbox is off.
    pub fill_edit: Color32,
    /// Whether undo/redo are currently possible (for button enabling).
    pub can_undo: bool,
    pub can_redo: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tools: ToolConfiguration::default(),
            fill_edit: Color32::WHITE,
            can_undo: false,
            can_redo: false,
        }
    }
}

pub(crate) fn to_color32(color: Color) -> Color32 {
    let c = color.to_rgba8();
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

pub(crate) fn from_color32(color: Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::from_rgba8(r, g, b, a)
}

/// Render the toolbar and return any triggered action.
pub fn render_toolbar(ctx: &Context, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            ui.label("Tool:");
            egui::ComboBox::from_id_salt("tool")
                .selected_text(state.tools.tool.name())
                .show_ui(ui, |ui| {
                    for tool in ToolKind::ALL {
                        ui.selectable_value(&mut state.tools.tool, tool, tool.name());
                    }
                });

            ui.separator();
            ui.label("Stroke:");
            let mut stroke = to_color32(state.tools.stroke_color);
            if ui.color_edit_button_srgba(&mut stroke).changed() {
                state.tools.stroke_color = from_color32(stroke);
            }

            let mut fill_enabled = state.tools.fill_color.is_some();
            let fill_toggled = ui.checkbox(&mut fill_enabled, "Fill:").changed();
            let fill_changed = ui
                .add_enabled_ui(fill_enabled, |ui| ui.color_edit_button_srgba(&mut state.fill_edit))
                .inner
                .changed();
            if fill_toggled || fill_changed {
                state.tools.fill_color = fill_enabled.then(|| from_color32(state.fill_edit));
            }

            ui.separator();
            ui.add(
                egui::Slider::new(&mut state.tools.size, MIN_TOOL_SIZE..=MAX_TOOL_SIZE)
                    .integer()
                    .text("Size"),
            );

            ui.separator();
            ui.label("Font:");
            egui::ComboBox::from_id_salt("font")
                .selected_text(state.tools.font.name())
                .show_ui(ui, |ui| {
                    for font in FontFamily::ALL {
                        ui.selectable_value(&mut state.tools.font, font, font.name());
                    }
                });
            ui.add(egui::TextEdit::singleline(&mut state.tools.text).desired_width(120.0));

            ui.separator();
            if ui.add_enabled(state.can_undo, egui::Button::new("Undo")).clicked() {
                action = Some(UiAction::Undo);
            }
            if ui.add_enabled(state.can_redo, egui::Button::new("Redo")).clicked() {
                action = Some(UiAction::Redo);
            }
            if ui.button("Clear").clicked() {
                action = Some(UiAction::Clear);
            }
            if ui.button("Save").clicked() {
                action = Some(UiAction::Save);
            }

            ui.separator();
            if ui.button("Audio").clicked() {
                action = Some(UiAction::OpenMedia(MediaKind::Audio));
            }
            if ui.button("Video").clicked() {
                action = Some(UiAction::OpenMedia(MediaKind::Video));
            }
        });
        ui.add_space(4.0);
    });

    action
}
