//! Resize handles around the placed image.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Which part of the image a resize drag moves.
///
/// Edges move one dimension and, for top/left, its origin. Corners move two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeDirection {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl ResizeDirection {
    /// Numeric direction code: 1–4 for edges, 5–8 for corners.
    pub fn code(self) -> u8 {
        match self {
            ResizeDirection::Top => 1,
            ResizeDirection::Right => 2,
            ResizeDirection::Bottom => 3,
            ResizeDirection::Left => 4,
            ResizeDirection::TopLeft => 5,
            ResizeDirection::TopRight => 6,
            ResizeDirection::BottomRight => 7,
            ResizeDirection::BottomLeft => 8,
        }
    }

    /// Inverse of [`ResizeDirection::code`]. Code 0 and unknown codes map to `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => ResizeDirection::Top,
            2 => ResizeDirection::Right,
            3 => ResizeDirection::Bottom,
            4 => ResizeDirection::Left,
            5 => ResizeDirection::TopLeft,
            6 => ResizeDirection::TopRight,
            7 => ResizeDirection::BottomRight,
            8 => ResizeDirection::BottomLeft,
            _ => return None,
        })
    }

    pub fn is_corner(self) -> bool {
        self.code() >= 5
    }

    /// Whether dragging moves the left edge (and so the x origin).
    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeDirection::Left | ResizeDirection::TopLeft | ResizeDirection::BottomLeft
        )
    }

    /// Whether dragging moves the right edge.
    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeDirection::Right | ResizeDirection::TopRight | ResizeDirection::BottomRight
        )
    }

    /// Whether dragging moves the top edge (and so the y origin).
    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeDirection::Top | ResizeDirection::TopLeft | ResizeDirection::TopRight
        )
    }

    /// Whether dragging moves the bottom edge.
    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeDirection::Bottom | ResizeDirection::BottomLeft | ResizeDirection::BottomRight
        )
    }
}

/// Classify a press against the image rectangle.
///
/// A coordinate counts as near an edge when it is strictly closer than
/// `handle_size`. Corners are checked before single edges, so a point near
/// two adjacent edges is always a corner. `None` means the press is a drag
/// of the image body.
pub fn resize_direction(point: Point, rect: Rect, handle_size: f64) -> Option<ResizeDirection> {
    let near_left = (point.x - rect.x0).abs() < handle_size;
    let near_right = (point.x - rect.x1).abs() < handle_size;
    let near_top = (point.y - rect.y0).abs() < handle_size;
    let near_bottom = (point.y - rect.y1).abs() < handle_size;

    let direction = if near_top && near_left {
        ResizeDirection::TopLeft
    } else if near_top && near_right {
        ResizeDirection::TopRight
    } else if near_bottom && near_right {
        ResizeDirection::BottomRight
    } else if near_bottom && near_left {
        ResizeDirection::BottomLeft
    } else if near_top {
        ResizeDirection::Top
    } else if near_right {
        ResizeDirection::Right
    } else if near_bottom {
        ResizeDirection::Bottom
    } else if near_left {
        ResizeDirection::Left
    } else {
        return None;
    };
    Some(direction)
}

/// Direction code for a press: 0 for none, otherwise [`ResizeDirection::code`].
pub fn resize_direction_code(point: Point, rect: Rect, handle_size: f64) -> u8 {
    resize_direction(point, rect, handle_size).map_or(0, ResizeDirection::code)
}

/// A visual handle drawn around the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// The part of the image this handle resizes.
    pub direction: ResizeDirection,
    /// Square occupied by the handle, centred on the edge or corner.
    pub rect: Rect,
}

/// The eight handles (four corners, four edge midpoints) around `bounds`.
pub fn image_handles(bounds: Rect, handle_size: f64) -> [Handle; 8] {
    let half = handle_size / 2.0;
    let at = |direction, x: f64, y: f64| Handle {
        direction,
        rect: Rect::new(x - half, y - half, x + half, y + half),
    };
    let center = bounds.center();
    [
        at(ResizeDirection::TopLeft, bounds.x0, bounds.y0),
        at(ResizeDirection::TopRight, bounds.x1, bounds.y0),
        at(ResizeDirection::BottomRight, bounds.x1, bounds.y1),
        at(ResizeDirection::BottomLeft, bounds.x0, bounds.y1),
        at(ResizeDirection::Top, center.x, bounds.y0),
        at(ResizeDirection::Right, bounds.x1, center.y),
        at(ResizeDirection::Bottom, center.x, bounds.y1),
        at(ResizeDirection::Left, bounds.x0, center.y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const HANDLE: f64 = 8.0;

    fn rect() -> Rect {
        Rect::new(100.0, 100.0, 300.0, 250.0)
    }

    #[test]
    fn test_single_edge_just_inside_threshold() {
        // 7 units from the left edge, far from every other edge.
        let p = Point::new(107.0, 175.0);
        assert_eq!(resize_direction(p, rect(), HANDLE), Some(ResizeDirection::Left));
        assert_eq!(resize_direction_code(p, rect(), HANDLE), 4);

        let p = Point::new(200.0, 243.0);
        assert_eq!(resize_direction(p, rect(), HANDLE), Some(ResizeDirection::Bottom));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let p = Point::new(108.0, 175.0);
        assert_eq!(resize_direction(p, rect(), HANDLE), None);
        assert_eq!(resize_direction_code(p, rect(), HANDLE), 0);
    }

    #[test]
    fn test_corner_beats_edge() {
        let cases = [
            (Point::new(103.0, 104.0), ResizeDirection::TopLeft),
            (Point::new(296.0, 101.0), ResizeDirection::TopRight),
            (Point::new(299.0, 249.0), ResizeDirection::BottomRight),
            (Point::new(101.0, 245.0), ResizeDirection::BottomLeft),
        ];
        for (p, expected) in cases {
            let dir = resize_direction(p, rect(), HANDLE).unwrap();
            assert_eq!(dir, expected);
            assert!(dir.is_corner());
        }
    }

    #[test]
    fn test_body_is_not_a_handle() {
        assert_eq!(resize_direction(Point::new(200.0, 175.0), rect(), HANDLE), None);
    }

    #[test]
    fn test_code_round_trip() {
        for code in 1..=8 {
            assert_eq!(ResizeDirection::from_code(code).unwrap().code(), code);
        }
        assert!(ResizeDirection::from_code(0).is_none());
        assert!(ResizeDirection::from_code(9).is_none());
    }

    #[test]
    fn test_handles_centered_on_bounds() {
        let handles = image_handles(rect(), HANDLE);
        let top = handles
            .iter()
            .find(|h| h.direction == ResizeDirection::Top)
            .unwrap();
        assert_eq!(top.rect, Rect::new(196.0, 96.0, 204.0, 104.0));
        assert_eq!(handles[0].rect.center(), Point::new(100.0, 100.0));
    }
}
