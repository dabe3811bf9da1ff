//! Keyboard shortcut registry.

use crate::ui::UiAction;
use eframe::egui::{self, Key, Modifiers};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub action: UiAction,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        action: UiAction,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn modifiers(&self) -> Modifiers {
        let mut modifiers = Modifiers::NONE;
        if self.ctrl {
            modifiers = modifiers | Modifiers::COMMAND;
        }
        if self.shift {
            modifiers = modifiers | Modifiers::SHIFT;
        }
        modifiers
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// All shortcuts. Shifted variants come before their unshifted key so
    /// that Ctrl+Shift+Z is not taken for Ctrl+Z.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, true, "Redo", UiAction::Redo),
            Shortcut::new("Z", true, false, "Undo", UiAction::Undo),
            Shortcut::new("Y", true, false, "Redo", UiAction::Redo),
            Shortcut::new("S", true, false, "Save canvas as image", UiAction::Save),
            Shortcut::new("Delete", true, false, "Clear canvas", UiAction::Clear),
        ]
    }

    /// Consume the first matching key press this frame.
    pub fn detect(ctx: &egui::Context) -> Option<UiAction> {
        if ctx.wants_keyboard_input() {
            return None;
        }
        ctx.input_mut(|input| {
            Self::all().into_iter().find_map(|shortcut| {
                let key = Key::from_name(shortcut.key)?;
                input
                    .consume_key(shortcut.modifiers(), key)
                    .then_some(shortcut.action)
            })
        })
    }

    /// Log all shortcuts at startup.
    pub fn log_all() {
        for shortcut in Self::all() {
            log::debug!("  {:20} {}", shortcut.format(), shortcut.description);
        }
    }
}
