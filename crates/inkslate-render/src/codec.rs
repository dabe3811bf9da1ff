//! Image file decoding and canvas export.

use crate::raster::CanvasSnapshot;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use inkslate_core::{ImageData, Result, SaveFormat, WhiteboardError};
use std::path::{Path, PathBuf};

/// Load an image file as straight RGBA8.
pub fn decode_image(path: &Path) -> Result<ImageData> {
    let decoded = image::open(path).map_err(|e| WhiteboardError::decode(path, e))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Decoded {} ({}x{})", path.display(), width, height);
    ImageData::new(width, height, rgba.into_raw())
        .ok_or_else(|| WhiteboardError::decode(path, "image has no pixels"))
}

/// Un-premultiply a snapshot into a straight RGBA image.
pub fn snapshot_to_rgba(snapshot: &CanvasSnapshot) -> RgbaImage {
    let pixmap = snapshot.pixmap();
    let mut out = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }
    out
}

/// Composite straight RGBA over white, dropping alpha.
fn flatten_on_white(rgba: &RgbaImage) -> RgbImage {
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        let a = a as u32;
        let over = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
        dst.0 = [over(r), over(g), over(b)];
    }
    out
}

/// Encode `snapshot` to `path` in `format`.
///
/// JPEG has no alpha channel, so the canvas is flattened onto white first.
/// On failure nothing usable is left at `path`.
pub fn encode_snapshot(snapshot: &CanvasSnapshot, format: SaveFormat, path: &Path) -> Result<()> {
    let extension = format.extension();
    let image_format = ImageFormat::from_extension(&extension)
        .ok_or_else(|| WhiteboardError::encode(path, format!("no encoder for .{extension}")))?;
    let rgba = snapshot_to_rgba(snapshot);
    let image = match format {
        SaveFormat::Jpg => DynamicImage::ImageRgb8(flatten_on_white(&rgba)),
        _ => DynamicImage::ImageRgba8(rgba),
    };
    image
        .save_with_format(path, image_format)
        .map_err(|e| {
            // Don't leave a truncated file behind.
            let _ = std::fs::remove_file(path);
            WhiteboardError::encode(path, e)
        })?;
    log::info!("Saved canvas as {} to {}", format.label(), path.display());
    Ok(())
}

/// Save to a user-chosen path, picking the format from its extension.
///
/// Returns the path actually written, which gains a `.png` extension when
/// the chosen one is not recognised.
pub fn save_canvas(snapshot: &CanvasSnapshot, path: &Path) -> Result<PathBuf> {
    let (path, format) = SaveFormat::resolve(path);
    encode_snapshot(snapshot, format, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RasterSurface;
    use inkslate_core::{ShapeKind, ShapeStyle, Surface};
    use kurbo::Point;
    use peniko::Color;

    fn drawn_snapshot() -> CanvasSnapshot {
        let mut surface = RasterSurface::new(40, 30).unwrap();
        surface.draw_shape(
            ShapeKind::Rectangle,
            Point::new(0.0, 0.0),
            Point::new(20.0, 30.0),
            &ShapeStyle {
                stroke_color: Color::BLACK,
                stroke_width: 1.0,
                fill_color: Some(Color::BLACK),
            },
        );
        surface.snapshot()
    }

    #[test]
    fn test_png_round_trip_keeps_transparency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.png");
        encode_snapshot(&drawn_snapshot(), SaveFormat::Png, &path).unwrap();

        let image = decode_image(&path).unwrap();
        assert_eq!((image.width, image.height), (40, 30));
        let pixel = |x: usize, y: usize| &image.pixels()[(y * 40 + x) * 4..(y * 40 + x) * 4 + 4];
        assert_eq!(pixel(10, 15), &[0, 0, 0, 255]);
        assert_eq!(pixel(35, 15)[3], 0);
    }

    #[test]
    fn test_jpg_is_flattened_on_white() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.jpg");
        encode_snapshot(&drawn_snapshot(), SaveFormat::Jpg, &path).unwrap();

        let image = image::open(&path).unwrap().to_rgb8();
        let light = image.get_pixel(35, 15).0;
        let dark = image.get_pixel(8, 15).0;
        assert!(light.iter().all(|&c| c > 230), "{light:?}");
        assert!(dark.iter().all(|&c| c < 30), "{dark:?}");
    }

    #[test]
    fn test_save_canvas_appends_png() {
        let dir = tempfile::tempdir().unwrap();
        let written = save_canvas(&drawn_snapshot(), &dir.path().join("untitled")).unwrap();
        assert_eq!(written, dir.path().join("untitled.png"));
        assert!(written.exists());
    }

    #[test]
    fn test_save_bmp_and_gif() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.bmp", "b.gif"] {
            let written = save_canvas(&drawn_snapshot(), &dir.path().join(name)).unwrap();
            assert!(decode_image(&written).is_ok());
        }
    }

    #[test]
    fn test_encoder_format_follows_filter_extension() {
        for format in SaveFormat::ALL {
            assert!(ImageFormat::from_extension(format.extension()).is_some(), "{format:?}");
        }
    }

    #[test]
    fn test_decode_missing_file() {
        let err = decode_image(Path::new("/nonexistent/missing.png")).unwrap_err();
        assert!(matches!(err, WhiteboardError::Decode { .. }));
    }

    #[test]
    fn test_decode_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(decode_image(&path), Err(WhiteboardError::Decode { .. })));
    }

    #[test]
    fn test_encode_into_missing_directory_fails() {
        let err = encode_snapshot(
            &drawn_snapshot(),
            SaveFormat::Png,
            Path::new("/nonexistent/dir/out.png"),
        )
        .unwrap_err();
        assert!(matches!(err, WhiteboardError::Encode { .. }));
    }
}
