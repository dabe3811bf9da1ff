//! Error taxonomy shared by every layer of the whiteboard.

use thiserror::Error;

/// Errors surfaced by whiteboard operations.
///
/// Every failure is terminal for the single operation that produced it.
/// Nothing is retried and prior state is left untouched.
#[derive(Debug, Error)]
pub enum WhiteboardError {
    /// An image or media file could not be read or is not supported.
    #[error("Could not load {path}: {reason}")]
    Decode { path: String, reason: String },
    /// The canvas could not be encoded or written.
    #[error("Could not save {path}: {reason}")]
    Encode { path: String, reason: String },
    /// An optional resource (such as the theme) is absent.
    #[error("Resource not found: {0}")]
    ResourceMissing(String),
}

impl WhiteboardError {
    /// Build a decode error for `path`.
    pub fn decode(path: impl AsRef<std::path::Path>, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Build an encode error for `path`.
    pub fn encode(path: impl AsRef<std::path::Path>, reason: impl ToString) -> Self {
        Self::Encode {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Title used when the error is shown to the user in a dialog.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Decode { .. } => "Load Error",
            Self::Encode { .. } => "Save Error",
            Self::ResourceMissing(_) => "Missing Resource",
        }
    }

    /// Whether this error should be shown in a modal dialog.
    ///
    /// Missing resources are only logged.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::ResourceMissing(_))
    }
}

/// Result type for whiteboard operations.
pub type Result<T> = std::result::Result<T, WhiteboardError>;
