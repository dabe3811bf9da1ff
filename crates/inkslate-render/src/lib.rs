//! Inkslate Render Library
//!
//! CPU rasterization of the whiteboard canvas with tiny-skia, text layout
//! with ab_glyph and image file codecs.

mod codec;
mod raster;
mod text;

pub use codec::{decode_image, encode_snapshot, save_canvas, snapshot_to_rgba};
pub use raster::{CanvasSnapshot, RasterSurface, RenderError};
pub use text::Fonts;
