//! Pointer events delivered to the interaction state machine.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Primary-button pointer event in canvas coordinates.
///
/// The shell is responsible for translating toolkit events into these
/// and for delivering them in order on the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Button went down over the canvas.
    Pressed(Point),
    /// Pointer moved while the button is held.
    Dragged(Point),
    /// Button was released (possibly outside the canvas).
    Released(Point),
}
