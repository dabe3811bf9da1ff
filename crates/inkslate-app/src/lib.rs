//! Inkslate Application
//!
//! Native window for the whiteboard: toolbar, canvas, dialogs and
//! detached media players.

mod app;
mod canvas;
mod dialogs;
mod media_window;
mod player;
mod shortcuts;
mod theme;
mod ui;

pub use app::{App, AppConfig};
pub use player::{RodioBackend, RodioPlayer};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use theme::Theme;
pub use ui::{UiAction, UiState, render_toolbar};
