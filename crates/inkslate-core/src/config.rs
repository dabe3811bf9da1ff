//! Session configuration.

use serde::{Deserialize, Serialize};

/// Default canvas width in logical units.
pub const CANVAS_WIDTH: u32 = 900;
/// Default canvas height in logical units.
pub const CANVAS_HEIGHT: u32 = 600;
/// Maximum number of snapshots kept in the undo stack.
pub const MAX_UNDO_HISTORY: usize = 50;
/// Distance from an image edge within which a press starts a resize.
pub const RESIZE_HANDLE_SIZE: f64 = 8.0;
/// Smallest width or height a placed image may be resized to.
pub const MIN_IMAGE_SIZE: f64 = 20.0;

/// Tunables for a whiteboard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Snapshots retained for undo, including the current one. Values
    /// below 1 are treated as 1.
    pub history_depth: usize,
    pub resize_handle_size: f64,
    pub min_image_size: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            history_depth: MAX_UNDO_HISTORY,
            resize_handle_size: RESIZE_HANDLE_SIZE,
            min_image_size: MIN_IMAGE_SIZE,
        }
    }
}
