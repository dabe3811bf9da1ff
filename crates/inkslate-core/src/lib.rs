//! Inkslate Core Library
//!
//! Toolkit-independent model of the whiteboard: tools, the interaction state
//! machine, undo/redo history, image placement and media sessions.

pub mod config;
pub mod error;
pub mod files;
pub mod handles;
pub mod history;
pub mod image;
pub mod input;
pub mod interaction;
pub mod media;
pub mod session;
pub mod surface;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use config::SessionConfig;
pub use error::{Result, WhiteboardError};
pub use files::{FileKind, SaveFormat};
pub use handles::{Handle, ResizeDirection, image_handles, resize_direction, resize_direction_code};
pub use history::History;
pub use image::PlacedImage;
pub use input::PointerEvent;
pub use interaction::{Interaction, InteractionOutcome, InteractionState};
pub use media::{MediaBackend, MediaKind, MediaLauncher, MediaPlayer, MediaSession, SeekBar, format_time};
pub use session::WhiteboardSession;
pub use surface::{ImageData, ShapeKind, ShapeStyle, Surface};
pub use tools::{FontFamily, ToolConfiguration, ToolKind};
