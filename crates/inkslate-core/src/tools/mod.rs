//! Tool system for the whiteboard.

use crate::files::FileKind;
use crate::surface::{ShapeKind, ShapeStyle};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Draw,
    Line,
    Rectangle,
    Circle,
    Text,
    Image,
    Eraser,
    Audio,
    Video,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 9] = [
        ToolKind::Draw,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Text,
        ToolKind::Image,
        ToolKind::Eraser,
        ToolKind::Audio,
        ToolKind::Video,
    ];

    /// Display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Draw => "Draw",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Text => "Text",
            ToolKind::Image => "Image",
            ToolKind::Eraser => "Eraser",
            ToolKind::Audio => "Audio",
            ToolKind::Video => "Video",
        }
    }

    /// What this tool does on press, drag and release.
    pub fn capabilities(self) -> ToolCapabilities {
        use DragAction as D;
        use PressAction as P;
        use ReleaseAction as R;

        let (press, drag, release) = match self {
            ToolKind::Draw => (P::BeginStroke, D::ExtendStroke, R::Commit),
            ToolKind::Line => (P::None, D::Preview(ShapeKind::Line), R::Commit),
            ToolKind::Rectangle => (P::None, D::Preview(ShapeKind::Rectangle), R::Commit),
            ToolKind::Circle => (P::None, D::Preview(ShapeKind::Circle), R::Commit),
            ToolKind::Text => (P::None, D::None, R::PlaceText),
            ToolKind::Image => (P::GrabImage, D::ManipulateImage, R::Open(FileKind::Image)),
            ToolKind::Eraser => (P::Erase, D::Erase, R::Commit),
            ToolKind::Audio => (P::None, D::None, R::Open(FileKind::Audio)),
            ToolKind::Video => (P::None, D::None, R::Open(FileKind::Video)),
        };
        ToolCapabilities { press, drag, release }
    }
}

/// Action taken when the pointer goes down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressAction {
    /// Nothing happens until drag or release.
    None,
    /// Start a freehand path.
    BeginStroke,
    /// Erase immediately under the pointer.
    Erase,
    /// Pick up the live placed image for dragging or resizing.
    GrabImage,
}

/// Action taken while the pointer is dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragAction {
    None,
    /// Append a segment to the freehand path.
    ExtendStroke,
    /// Re-render a preview of the given shape.
    Preview(ShapeKind),
    Erase,
    /// Move or resize the grabbed image.
    ManipulateImage,
}

/// Action taken when the pointer is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseAction {
    /// Commit whatever the gesture produced.
    Commit,
    /// Draw the configured text at the release point, then commit.
    PlaceText,
    /// Ask the shell to open a file of this kind, unless a drag was in progress.
    Open(FileKind),
}

/// Handler table entry for a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolCapabilities {
    pub press: PressAction,
    pub drag: DragAction,
    pub release: ReleaseAction,
}

/// Font families offered for the text tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FontFamily {
    #[default]
    Arial,
    Verdana,
    TimesNewRoman,
    CourierNew,
}

impl FontFamily {
    pub const ALL: [FontFamily; 4] = [
        FontFamily::Arial,
        FontFamily::Verdana,
        FontFamily::TimesNewRoman,
        FontFamily::CourierNew,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::Verdana => "Verdana",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::CourierNew => "Courier New",
        }
    }

    /// Whether glyphs in this family share one advance width.
    pub fn is_monospace(self) -> bool {
        matches!(self, FontFamily::CourierNew)
    }
}

/// Minimum value of the size slider.
pub const MIN_TOOL_SIZE: f64 = 1.0;
/// Maximum value of the size slider.
pub const MAX_TOOL_SIZE: f64 = 50.0;

/// Snapshot of the toolbar controls, passed into every pointer event.
#[derive(Debug, Clone)]
pub struct ToolConfiguration {
    pub tool: ToolKind,
    pub stroke_color: Color,
    /// Fill color for shapes (None = transparent).
    pub fill_color: Option<Color>,
    /// Size slider value, used as line width.
    pub size: f64,
    pub font: FontFamily,
    /// Text placed by the text tool.
    pub text: String,
}

impl Default for ToolConfiguration {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            stroke_color: Color::BLACK,
            fill_color: None,
            size: 5.0,
            font: FontFamily::default(),
            text: "NGOLA".to_string(),
        }
    }
}

impl ToolConfiguration {
    /// Configuration with a different tool selected.
    pub fn with_tool(mut self, tool: ToolKind) -> Self {
        self.tool = tool;
        self
    }

    /// Line width, clamped to the slider range.
    pub fn line_width(&self) -> f64 {
        self.size.clamp(MIN_TOOL_SIZE, MAX_TOOL_SIZE)
    }

    /// Pixel size of text drawn by the text tool.
    pub fn text_size(&self) -> f64 {
        self.line_width() * 3.0
    }

    /// Side length of the square cleared by the eraser.
    pub fn eraser_size(&self) -> f64 {
        self.line_width() * 2.0
    }

    /// Style applied to lines, rectangles and circles.
    ///
    /// A fully transparent fill is treated as no fill.
    pub fn shape_style(&self) -> ShapeStyle {
        ShapeStyle {
            stroke_color: self.stroke_color,
            stroke_width: self.line_width(),
            fill_color: self
                .fill_color
                .filter(|c| c.to_rgba8().a > 0),
        }
    }
}
