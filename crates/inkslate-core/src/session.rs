//! Whiteboard session: canvas surface, history and live image.

use crate::config::SessionConfig;
use crate::handles::{Handle, image_handles};
use crate::history::History;
use crate::image::PlacedImage;
use crate::interaction::{Interaction, InteractionState};
use crate::surface::{ImageData, Surface};
use kurbo::Point;

/// The live image together with the committed canvas underneath it.
///
/// Dragging and resizing redraw from `base`, so earlier positions of the
/// image never linger on the canvas.
#[derive(Debug, Clone)]
pub(crate) struct LiveImage<T> {
    pub image: PlacedImage,
    pub base: T,
}

/// One whiteboard: owns the surface exclusively, plus its undo history.
///
/// Every method runs on the caller's thread and mutates in place; the
/// session is meant to be driven from a single UI thread.
pub struct WhiteboardSession<S: Surface> {
    pub(crate) config: SessionConfig,
    pub(crate) surface: S,
    pub(crate) history: History<S::Snapshot>,
    pub(crate) interaction: Interaction,
    pub(crate) image: Option<LiveImage<S::Snapshot>>,
}

impl<S: Surface> WhiteboardSession<S> {
    /// Start a session on `surface`, cleared to a blank baseline.
    pub fn new(mut surface: S, config: SessionConfig) -> Self {
        surface.clear();
        let history = History::new(surface.snapshot(), config.history_depth);
        log::info!(
            "Whiteboard session started ({}x{}, history depth {})",
            config.canvas_width,
            config.canvas_height,
            history.max_depth()
        );
        Self {
            config,
            surface,
            history,
            interaction: Interaction::default(),
            image: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The surface as currently drawn, including uncommitted previews.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn history(&self) -> &History<S::Snapshot> {
        &self.history
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    /// The committed canvas: what gets saved.
    pub fn committed(&self) -> &S::Snapshot {
        self.history.current()
    }

    /// The live placed image, if one can still be dragged or resized.
    pub fn placed_image(&self) -> Option<&PlacedImage> {
        self.image.as_ref().map(|live| &live.image)
    }

    /// Resize handles for the live image.
    pub fn image_handles(&self) -> Option<[Handle; 8]> {
        self.placed_image()
            .map(|img| image_handles(img.bounds(), self.config.resize_handle_size))
    }

    /// Place a freshly decoded image around `at` and commit it.
    ///
    /// Any previous live image stays on the canvas as ordinary pixels.
    pub fn place_image(&mut self, source: ImageData, at: Point) {
        let image = PlacedImage::place(source, at, self.surface.size());
        log::info!(
            "Placed {}x{} image at ({:.0}, {:.0}) size {:.0}x{:.0}",
            image.source.width,
            image.source.height,
            image.position.x,
            image.position.y,
            image.width,
            image.height
        );
        let base = self.history.current().clone();
        self.image = Some(LiveImage { image, base });
        self.redraw_live_image();
        self.commit_image();
    }

    /// Step back one committed state. Returns false when only the baseline remains.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.surface.restore(snapshot);
        self.image = None;
        log::debug!("Undo ({} states left)", self.history.undo_len());
        true
    }

    /// Re-apply the most recently undone state. Returns false when nothing was undone.
    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.surface.restore(snapshot);
        self.image = None;
        log::debug!("Redo ({} states left)", self.history.redo_len());
        true
    }

    /// Blank the canvas and start a fresh history.
    pub fn clear(&mut self) {
        self.interaction = Interaction::default();
        self.image = None;
        self.surface.clear();
        self.history.reset(self.surface.snapshot());
        log::info!("Canvas cleared");
    }

    /// Repaint the surface from the committed state, dropping any preview.
    pub fn redraw(&mut self) {
        self.surface.restore(self.history.current());
    }

    /// Abandon an in-progress gesture and discard what it drew.
    ///
    /// An image caught mid-drag is left where it was last committed and
    /// can no longer be moved.
    pub fn cancel_gesture(&mut self) {
        if !self.interaction.is_pointer_down() {
            return;
        }
        if matches!(
            self.interaction.state(),
            InteractionState::ImageDragging | InteractionState::ImageResizing
        ) {
            self.image = None;
        }
        self.interaction = Interaction::default();
        self.redraw();
        log::debug!("Gesture cancelled");
    }

    /// Commit a gesture that drew ordinary pixels. The live image, if any,
    /// becomes part of the canvas and can no longer be moved.
    pub(crate) fn commit_gesture(&mut self) {
        self.image = None;
        self.history.commit(self.surface.snapshot());
    }

    /// Commit the current position and size of the live image.
    pub(crate) fn commit_image(&mut self) {
        self.history.commit(self.surface.snapshot());
    }

    /// Redraw the canvas beneath the live image, then the image itself.
    pub(crate) fn redraw_live_image(&mut self) {
        if let Some(live) = self.image.as_ref() {
            self.surface.restore(&live.base);
            self.surface.composite_image(&live.image.source, live.image.bounds());
        }
    }
}
