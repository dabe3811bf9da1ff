//! File kinds, dialog filters and save formats.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kinds of file the tools can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    Image,
    Audio,
    Video,
}

impl FileKind {
    /// Title of the open dialog.
    pub fn dialog_title(self) -> &'static str {
        match self {
            FileKind::Image => "Select Image",
            FileKind::Audio => "Select Audio",
            FileKind::Video => "Select Video",
        }
    }

    /// Description shown next to the filter.
    pub fn filter_name(self) -> &'static str {
        match self {
            FileKind::Image => "Image Files",
            FileKind::Audio => "Audio Files",
            FileKind::Video => "Video Files",
        }
    }

    /// Accepted file extensions, lowercase and without the dot.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileKind::Image => &["png", "jpg", "jpeg", "gif", "bmp"],
            FileKind::Audio => &["mp3", "wav"],
            FileKind::Video => &["mp4", "avi", "mov"],
        }
    }

    /// Whether `path` carries one of the accepted extensions.
    pub fn accepts(self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .is_some_and(|e| self.extensions().contains(&e.as_str()))
    }
}

/// Formats the canvas can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SaveFormat {
    #[default]
    Png,
    Jpg,
    Bmp,
    Gif,
}

impl SaveFormat {
    /// All formats, in the order offered by the save dialog.
    pub const ALL: [SaveFormat; 4] = [SaveFormat::Png, SaveFormat::Jpg, SaveFormat::Bmp, SaveFormat::Gif];

    /// Label of the format in the dialog.
    pub fn label(self) -> &'static str {
        match self {
            SaveFormat::Png => "PNG",
            SaveFormat::Jpg => "JPG",
            SaveFormat::Bmp => "BMP",
            SaveFormat::Gif => "GIF",
        }
    }

    /// Full filter description, e.g. `"JPG (*.jpg)"`.
    pub fn filter_description(self) -> String {
        format!("{} (*.{})", self.label(), self.label().to_lowercase())
    }

    /// Extension handed to the encoder, derived from the filter description.
    pub fn extension(self) -> String {
        extension_from_filter_description(&self.filter_description())
    }

    /// Look up a format by file extension (case-insensitive; `jpeg` maps to JPG).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(SaveFormat::Png),
            "jpg" | "jpeg" => Some(SaveFormat::Jpg),
            "bmp" => Some(SaveFormat::Bmp),
            "gif" => Some(SaveFormat::Gif),
            _ => None,
        }
    }

    /// Format implied by the extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Pick the format for a chosen save path.
    ///
    /// A recognised extension decides the format. Otherwise PNG is used and
    /// its extension appended.
    pub fn resolve(path: &Path) -> (PathBuf, SaveFormat) {
        match Self::from_path(path) {
            Some(format) => (path.to_path_buf(), format),
            None => {
                let format = SaveFormat::default();
                let mut name = path.as_os_str().to_os_string();
                name.push(".");
                name.push(format.extension());
                (PathBuf::from(name), format)
            }
        }
    }
}

/// Text before the first `(` of a filter description, trimmed and lowercased.
pub fn extension_from_filter_description(description: &str) -> String {
    description
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}
