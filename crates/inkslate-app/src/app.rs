//! Main application state and frame loop.

use crate::canvas::CanvasView;
use crate::dialogs;
use crate::media_window;
use crate::player::RodioBackend;
use crate::shortcuts::ShortcutRegistry;
use crate::theme::Theme;
use crate::ui::{UiAction, UiState, render_toolbar};
use eframe::egui;
use inkslate_core::{
    FileKind, InteractionOutcome, MediaKind, MediaLauncher, SessionConfig, ToolKind,
    WhiteboardSession,
};
use inkslate_render::{RasterSurface, RenderError, decode_image, save_canvas};
use kurbo::Point;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    /// Optional theme resource; absence only logs a warning.
    pub theme_path: Option<PathBuf>,
    pub session: SessionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Digital Whiteboard".to_string(),
            width: 1000.0,
            height: 700.0,
            theme_path: Some(PathBuf::from("resources/theme.json")),
            session: SessionConfig::default(),
        }
    }
}

/// How often open media windows refresh their seek bars.
const MEDIA_REFRESH: Duration = Duration::from_millis(250);

/// The whiteboard window.
pub struct App {
    session: WhiteboardSession<RasterSurface>,
    ui_state: UiState,
    canvas: CanvasView,
    media: MediaLauncher<RodioBackend>,
    theme: Theme,
}

impl App {
    pub fn new(ctx: &egui::Context, config: &AppConfig) -> Result<Self, RenderError> {
        let theme = Theme::load_or_default(config.theme_path.as_deref());
        theme.apply(ctx);

        let surface = RasterSurface::new(config.session.canvas_width, config.session.canvas_height)?;
        let mut canvas = CanvasView::default();
        canvas.mark_dirty();

        Ok(Self {
            session: WhiteboardSession::new(surface, config.session.clone()),
            ui_state: UiState::default(),
            canvas,
            media: MediaLauncher::new(RodioBackend),
            theme,
        })
    }

    /// Open the native window and run until it is closed.
    pub fn run(config: AppConfig) -> eframe::Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(config.title.clone())
                .with_inner_size([config.width, config.height]),
            ..Default::default()
        };
        ShortcutRegistry::log_all();

        let title = config.title.clone();
        eframe::run_native(
            &title,
            options,
            Box::new(move |cc| Ok(Box::new(App::new(&cc.egui_ctx, &config)?))),
        )
    }

    fn handle_action(&mut self, action: UiAction) {
        match action {
            UiAction::Undo => {
                if self.session.undo() {
                    log::info!("Undo performed");
                    self.canvas.mark_dirty();
                }
            }
            UiAction::Redo => {
                if self.session.redo() {
                    log::info!("Redo performed");
                    self.canvas.mark_dirty();
                }
            }
            UiAction::Clear => {
                self.session.clear();
                self.canvas.mark_dirty();
            }
            UiAction::Save => self.save(),
            UiAction::OpenMedia(kind) => self.open_media(kind),
        }
    }

    fn save(&mut self) {
        let Some(path) = dialogs::pick_save_path() else {
            return;
        };
        if let Err(e) = save_canvas(self.session.committed(), &path) {
            dialogs::report(&e);
        }
    }

    fn open_media(&mut self, kind: MediaKind) {
        let Some(path) = dialogs::pick_file(kind.file_kind()) else {
            return;
        };
        if let Err(e) = self.media.open(path, kind) {
            dialogs::report(&e);
        }
    }

    fn open_image(&mut self, at: Point) {
        let Some(path) = dialogs::pick_file(FileKind::Image) else {
            return;
        };
        match decode_image(&path) {
            Ok(image) => {
                self.session.place_image(image, at);
                self.canvas.mark_dirty();
            }
            Err(e) => dialogs::report(&e),
        }
    }

    fn handle_outcome(&mut self, outcome: InteractionOutcome) {
        match outcome {
            InteractionOutcome::None => {}
            InteractionOutcome::Changed | InteractionOutcome::Committed => self.canvas.mark_dirty(),
            InteractionOutcome::OpenFile { kind, at } => {
                // A press that finished an earlier gesture may have drawn too.
                self.canvas.mark_dirty();
                match MediaKind::from_file_kind(kind) {
                    Some(media) => self.open_media(media),
                    None => self.open_image(at),
                }
            }
        }
    }

    fn show_media_windows(&mut self, ctx: &egui::Context) {
        if self.media.is_empty() {
            return;
        }
        self.media.tick();
        let closed: Vec<_> = self
            .media
            .sessions_mut()
            .iter_mut()
            .filter_map(|session| media_window::show(ctx, session).then(|| session.id()))
            .collect();
        for id in closed {
            self.media.close(id);
        }
        ctx.request_repaint_after(MEDIA_REFRESH);
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_state.can_undo = self.session.history().can_undo();
        self.ui_state.can_redo = self.session.history().can_redo();

        let toolbar_action = render_toolbar(ctx, &mut self.ui_state);
        if let Some(action) = toolbar_action.or_else(|| ShortcutRegistry::detect(ctx)) {
            self.handle_action(action);
        }

        let show_handles = self.ui_state.tools.tool == ToolKind::Image;
        let events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::both()
                    .drag_to_scroll(false)
                    .show(ui, |ui| {
                        self.canvas
                            .show(ui, &self.session, &self.theme, show_handles)
                    })
                    .inner
            })
            .inner;

        for event in events {
            let outcome = self.session.handle_pointer(event, &self.ui_state.tools);
            self.handle_outcome(outcome);
        }

        self.show_media_windows(ctx);
    }

    fn on_exit(&mut self) {
        log::info!("Closing {} media window(s)", self.media.sessions().len());
        self.media.close_all();
    }
}
