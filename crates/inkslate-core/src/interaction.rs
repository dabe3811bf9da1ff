//! Interaction state machine driven by pointer events.
//!
//! One gesture is in progress at a time. Press, drag and release events are
//! routed through the tool's [`ToolCapabilities`] and mutate the session's
//! surface; a completed gesture is committed to the history.

use crate::files::FileKind;
use crate::handles::{ResizeDirection, resize_direction};
use crate::input::PointerEvent;
use crate::session::WhiteboardSession;
use crate::surface::{ShapeKind, Surface};
use crate::tools::{
    DragAction, PressAction, ReleaseAction, ToolCapabilities, ToolConfiguration, ToolKind,
};
use kurbo::{Point, Vec2};

/// Externally visible state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Freehand stroke in progress.
    Drawing,
    /// Line, rectangle or circle preview following the pointer.
    ShapingPreview,
    ImageDragging,
    ImageResizing,
}

/// Gesture data carried by the active state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) enum Gesture {
    #[default]
    Idle,
    Drawing {
        last: Point,
    },
    ShapingPreview {
        kind: ShapeKind,
        origin: Point,
    },
    ImageDragging {
        /// Pointer position relative to the image's top-left corner.
        grab_offset: Vec2,
    },
    ImageResizing {
        direction: ResizeDirection,
        last: Point,
    },
}

/// Pointer-down bookkeeping that lives alongside the gesture.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PointerDown {
    /// Tool selected when the button went down.
    pub tool: ToolKind,
    /// Press position.
    pub origin: Point,
    /// Whether the surface was mutated outside a tracked gesture (eraser).
    pub dirty: bool,
}

/// Tracks the current gesture between pointer events.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    pub(crate) gesture: Gesture,
    pub(crate) pointer: Option<PointerDown>,
}

impl Interaction {
    pub fn state(&self) -> InteractionState {
        match self.gesture {
            Gesture::Idle => InteractionState::Idle,
            Gesture::Drawing { .. } => InteractionState::Drawing,
            Gesture::ShapingPreview { .. } => InteractionState::ShapingPreview,
            Gesture::ImageDragging { .. } => InteractionState::ImageDragging,
            Gesture::ImageResizing { .. } => InteractionState::ImageResizing,
        }
    }

    /// Resize direction code of the current gesture (0 when not resizing).
    pub fn resize_direction_code(&self) -> u8 {
        match self.gesture {
            Gesture::ImageResizing { direction, .. } => direction.code(),
            _ => 0,
        }
    }

    /// Press position of the gesture in progress.
    pub fn origin(&self) -> Option<Point> {
        self.pointer.map(|p| p.origin)
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer.is_some()
    }

    fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.pointer = None;
    }
}

/// What the shell should do after an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionOutcome {
    /// Nothing visible changed.
    None,
    /// The surface changed and should be repainted.
    Changed,
    /// A gesture completed and a snapshot was committed.
    Committed,
    /// Show an open dialog for `kind`; `at` is the press position.
    OpenFile { kind: FileKind, at: Point },
}

impl InteractionOutcome {
    /// Combine the outcomes of two steps handled for one event. An open
    /// request wins over a commit, which wins over a plain change.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (open @ Self::OpenFile { .. }, _) | (_, open @ Self::OpenFile { .. }) => open,
            (Self::Committed, _) | (_, Self::Committed) => Self::Committed,
            (Self::Changed, _) | (_, Self::Changed) => Self::Changed,
            _ => Self::None,
        }
    }
}

impl<S: Surface> WhiteboardSession<S> {
    /// Feed one pointer event through the state machine.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        config: &ToolConfiguration,
    ) -> InteractionOutcome {
        match event {
            PointerEvent::Pressed(p) => self.on_press(p, config),
            PointerEvent::Dragged(p) => self.on_drag(p, config),
            PointerEvent::Released(p) => self.on_release(p, config),
        }
    }

    fn on_press(&mut self, point: Point, config: &ToolConfiguration) -> InteractionOutcome {
        // A press without a release in between: finish the old gesture first
        // and keep what it produced, such as a pending open request.
        let finished = if self.interaction.pointer.is_some() {
            log::debug!("Press while a gesture was active; completing it");
            self.on_release(point, config)
        } else {
            InteractionOutcome::None
        };

        let tool = config.tool;
        self.interaction.pointer = Some(PointerDown {
            tool,
            origin: point,
            dirty: false,
        });

        let pressed = match tool.capabilities().press {
            PressAction::None => InteractionOutcome::None,
            PressAction::BeginStroke => {
                self.interaction.gesture = Gesture::Drawing { last: point };
                InteractionOutcome::None
            }
            PressAction::Erase => {
                self.erase(point, config);
                InteractionOutcome::Changed
            }
            PressAction::GrabImage => self.grab_image(point),
        };
        finished.merge(pressed)
    }

    fn grab_image(&mut self, point: Point) -> InteractionOutcome {
        let handle_size = self.config.resize_handle_size;
        let Some(live) = self.image.as_ref() else {
            return InteractionOutcome::None;
        };
        if !live.image.contains(point) {
            return InteractionOutcome::None;
        }

        self.interaction.gesture = match resize_direction(point, live.image.bounds(), handle_size) {
            Some(direction) => Gesture::ImageResizing {
                direction,
                last: point,
            },
            None => Gesture::ImageDragging {
                grab_offset: point - live.image.position,
            },
        };
        InteractionOutcome::None
    }

    fn on_drag(&mut self, point: Point, config: &ToolConfiguration) -> InteractionOutcome {
        let Some(down) = self.interaction.pointer else {
            return InteractionOutcome::None;
        };

        match down.tool.capabilities().drag {
            DragAction::None => InteractionOutcome::None,
            DragAction::ExtendStroke => {
                let Gesture::Drawing { last } = self.interaction.gesture else {
                    return InteractionOutcome::None;
                };
                self.surface
                    .draw_stroke(&[last, point], config.stroke_color, config.line_width());
                self.interaction.gesture = Gesture::Drawing { last: point };
                InteractionOutcome::Changed
            }
            DragAction::Preview(kind) => {
                self.interaction.gesture = Gesture::ShapingPreview {
                    kind,
                    origin: down.origin,
                };
                self.preview_shape(kind, down.origin, point, config);
                InteractionOutcome::Changed
            }
            DragAction::Erase => {
                self.erase(point, config);
                InteractionOutcome::Changed
            }
            DragAction::ManipulateImage => self.manipulate_image(point),
        }
    }

    /// Move or resize the grabbed image. A drag that started off the image does nothing.
    fn manipulate_image(&mut self, point: Point) -> InteractionOutcome {
        match self.interaction.gesture {
            Gesture::ImageDragging { grab_offset } => {
                if let Some(live) = self.image.as_mut() {
                    live.image.drag_to(point, grab_offset);
                }
            }
            Gesture::ImageResizing { direction, last } => {
                let min_size = self.config.min_image_size;
                if let Some(live) = self.image.as_mut() {
                    live.image.resize(direction, point - last, min_size);
                }
                self.interaction.gesture = Gesture::ImageResizing {
                    direction,
                    last: point,
                };
            }
            _ => return InteractionOutcome::None,
        }
        self.redraw_live_image();
        InteractionOutcome::Changed
    }

    fn on_release(&mut self, point: Point, config: &ToolConfiguration) -> InteractionOutcome {
        let Some(down) = self.interaction.pointer else {
            return InteractionOutcome::None;
        };
        let gesture = self.interaction.gesture;
        self.interaction.reset();

        match gesture {
            Gesture::Drawing { .. } => {
                self.commit_gesture();
                InteractionOutcome::Committed
            }
            Gesture::ShapingPreview { kind, origin } => {
                self.preview_shape(kind, origin, point, config);
                self.commit_gesture();
                InteractionOutcome::Committed
            }
            Gesture::ImageDragging { .. } | Gesture::ImageResizing { .. } => {
                self.redraw_live_image();
                self.commit_image();
                InteractionOutcome::Committed
            }
            Gesture::Idle => self.release_idle(down, point, config),
        }
    }

    fn release_idle(
        &mut self,
        down: PointerDown,
        point: Point,
        config: &ToolConfiguration,
    ) -> InteractionOutcome {
        let ToolCapabilities { release, .. } = down.tool.capabilities();
        match release {
            ReleaseAction::Commit if down.dirty => {
                self.commit_gesture();
                InteractionOutcome::Committed
            }
            ReleaseAction::Commit => InteractionOutcome::None,
            ReleaseAction::PlaceText => {
                if config.text.is_empty() {
                    return InteractionOutcome::None;
                }
                self.surface.draw_text(
                    &config.text,
                    point,
                    config.font,
                    config.text_size(),
                    config.stroke_color,
                );
                self.commit_gesture();
                InteractionOutcome::Committed
            }
            ReleaseAction::Open(kind) => InteractionOutcome::OpenFile {
                kind,
                at: down.origin,
            },
        }
    }

    fn erase(&mut self, point: Point, config: &ToolConfiguration) {
        self.surface.erase_region(point, config.eraser_size());
        if let Some(down) = self.interaction.pointer.as_mut() {
            down.dirty = true;
        }
    }

    /// Re-render from the last committed snapshot plus the live shape, so
    /// earlier preview frames never accumulate.
    fn preview_shape(&mut self, kind: ShapeKind, origin: Point, point: Point, config: &ToolConfiguration) {
        self.surface.restore(self.history.current());
        self.surface
            .draw_shape(kind, origin, point, &config.shape_style());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ImageData;
    use crate::testing::{DrawOp, RecordingSurface};
    use crate::SessionConfig;
    use kurbo::Rect;
    use peniko::Color;

    fn session() -> WhiteboardSession<RecordingSurface> {
        WhiteboardSession::new(RecordingSurface::new(900.0, 600.0), SessionConfig::default())
    }

    fn tool(kind: ToolKind) -> ToolConfiguration {
        ToolConfiguration::default().with_tool(kind)
    }

    fn square_image(side: u32) -> ImageData {
        ImageData::new(side, side, vec![200; (side * side * 4) as usize]).unwrap()
    }

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_freehand_appends_segments_and_commits() {
        let mut s = session();
        let cfg = tool(ToolKind::Draw);

        s.handle_pointer(PointerEvent::Pressed(p(10.0, 10.0)), &cfg);
        assert_eq!(s.interaction_state(), InteractionState::Drawing);
        s.handle_pointer(PointerEvent::Dragged(p(20.0, 10.0)), &cfg);
        s.handle_pointer(PointerEvent::Dragged(p(30.0, 15.0)), &cfg);

        // Incremental: two segment ops, no restore in between.
        let strokes: Vec<_> = s
            .surface()
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke { .. }))
            .collect();
        assert_eq!(strokes.len(), 2);
        assert_eq!(s.surface().restores(), 0);

        let outcome = s.handle_pointer(PointerEvent::Released(p(30.0, 15.0)), &cfg);
        assert_eq!(outcome, InteractionOutcome::Committed);
        assert_eq!(s.interaction_state(), InteractionState::Idle);
        assert_eq!(s.history().undo_len(), 2);
    }

    #[test]
    fn test_shape_preview_does_not_accumulate() {
        let mut s = session();
        let cfg = tool(ToolKind::Rectangle);

        s.handle_pointer(PointerEvent::Pressed(p(10.0, 10.0)), &cfg);
        assert_eq!(s.interaction_state(), InteractionState::Idle);
        for x in [20.0, 40.0, 60.0, 80.0] {
            s.handle_pointer(PointerEvent::Dragged(p(x, x)), &cfg);
            assert_eq!(s.interaction_state(), InteractionState::ShapingPreview);
            assert_eq!(s.surface().ops().len(), 1);
        }
        s.handle_pointer(PointerEvent::Released(p(100.0, 90.0)), &cfg);

        let ops = s.surface().ops();
        assert_eq!(ops.len(), 1);
        match &ops[0] {
            DrawOp::Shape { kind, p1, p2, .. } => {
                assert_eq!(*kind, ShapeKind::Rectangle);
                assert_eq!(*p1, p(10.0, 10.0));
                assert_eq!(*p2, p(100.0, 90.0));
            }
            other => panic!("unexpected op {other:?}"),
        }
        assert_eq!(s.history().undo_len(), 2);
    }

    #[test]
    fn test_transparent_circle_is_outline_only() {
        let mut s = session();
        let cfg = ToolConfiguration {
            fill_color: Some(Color::TRANSPARENT),
            ..tool(ToolKind::Circle)
        };

        s.handle_pointer(PointerEvent::Pressed(p(100.0, 100.0)), &cfg);
        s.handle_pointer(PointerEvent::Dragged(p(120.0, 100.0)), &cfg);
        s.handle_pointer(PointerEvent::Released(p(140.0, 100.0)), &cfg);

        match &s.surface().ops()[0] {
            DrawOp::Shape {
                kind,
                p1,
                p2,
                filled,
                ..
            } => {
                assert_eq!(*kind, ShapeKind::Circle);
                assert!(!filled);
                let bounds = kind.bounds(*p1, *p2);
                assert_eq!(bounds, Rect::new(60.0, 60.0, 140.0, 140.0));
                assert_eq!(bounds.width() / 2.0, 40.0);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_click_with_shape_tool_commits_nothing() {
        let mut s = session();
        let cfg = tool(ToolKind::Line);
        s.handle_pointer(PointerEvent::Pressed(p(10.0, 10.0)), &cfg);
        let outcome = s.handle_pointer(PointerEvent::Released(p(10.0, 10.0)), &cfg);
        assert_eq!(outcome, InteractionOutcome::None);
        assert_eq!(s.history().undo_len(), 1);
    }

    #[test]
    fn test_eraser_press_erases_and_stays_idle() {
        let mut s = session();
        let cfg = ToolConfiguration {
            size: 5.0,
            ..tool(ToolKind::Eraser)
        };

        let outcome = s.handle_pointer(PointerEvent::Pressed(p(50.0, 50.0)), &cfg);
        assert_eq!(outcome, InteractionOutcome::Changed);
        assert_eq!(s.interaction_state(), InteractionState::Idle);
        s.handle_pointer(PointerEvent::Dragged(p(60.0, 50.0)), &cfg);
        assert_eq!(
            s.surface().ops(),
            &[
                DrawOp::Erase { center: p(50.0, 50.0), size: 10.0 },
                DrawOp::Erase { center: p(60.0, 50.0), size: 10.0 },
            ]
        );

        let outcome = s.handle_pointer(PointerEvent::Released(p(60.0, 50.0)), &cfg);
        assert_eq!(outcome, InteractionOutcome::Committed);
        assert_eq!(s.history().undo_len(), 2);
    }

    #[test]
    fn test_text_drawn_on_release() {
        let mut s = session();
        let cfg = ToolConfiguration {
            text: "hello".into(),
            size: 4.0,
            ..tool(ToolKind::Text)
        };
        s.handle_pointer(PointerEvent::Pressed(p(5.0, 5.0)), &cfg);
        assert!(s.surface().ops().is_empty());
        s.handle_pointer(PointerEvent::Released(p(40.0, 50.0)), &cfg);
        assert_eq!(
            s.surface().ops()[0],
            DrawOp::Text {
                text: "hello".into(),
                position: p(40.0, 50.0),
                size: 12.0,
            }
        );
        assert_eq!(s.history().undo_len(), 2);
    }

    #[test]
    fn test_media_tools_request_open_on_release() {
        let mut s = session();
        for (kind, file) in [
            (ToolKind::Audio, FileKind::Audio),
            (ToolKind::Video, FileKind::Video),
            (ToolKind::Image, FileKind::Image),
        ] {
            let cfg = tool(kind);
            s.handle_pointer(PointerEvent::Pressed(p(300.0, 300.0)), &cfg);
            let outcome = s.handle_pointer(PointerEvent::Released(p(310.0, 305.0)), &cfg);
            assert_eq!(
                outcome,
                InteractionOutcome::OpenFile {
                    kind: file,
                    at: p(300.0, 300.0)
                }
            );
        }
        assert_eq!(s.history().undo_len(), 1);
    }

    #[test]
    fn test_image_drag_moves_top_left() {
        let mut s = session();
        let cfg = tool(ToolKind::Image);
        s.place_image(square_image(400), p(300.0, 300.0));
        assert_eq!(s.placed_image().unwrap().position, p(250.0, 250.0));

        s.handle_pointer(PointerEvent::Pressed(p(300.0, 300.0)), &cfg);
        assert_eq!(s.interaction_state(), InteractionState::ImageDragging);
        s.handle_pointer(PointerEvent::Dragged(p(320.0, 330.0)), &cfg);
        assert_eq!(s.placed_image().unwrap().position, p(270.0, 280.0));

        let outcome = s.handle_pointer(PointerEvent::Released(p(320.0, 330.0)), &cfg);
        assert_eq!(outcome, InteractionOutcome::Committed);
        assert_eq!(s.history().undo_len(), 3);

        // Only the base plus the image at its final position, no ghost.
        let images: Vec<_> = s
            .surface()
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image { rect } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(images, vec![Rect::new(270.0, 280.0, 370.0, 380.0)]);
    }

    #[test]
    fn test_image_resize_from_corner() {
        let mut s = session();
        let cfg = tool(ToolKind::Image);
        s.place_image(square_image(400), p(300.0, 300.0));

        // Just inside the bottom-right corner of (250,250)-(350,350).
        s.handle_pointer(PointerEvent::Pressed(p(347.0, 346.0)), &cfg);
        assert_eq!(s.interaction_state(), InteractionState::ImageResizing);
        assert_eq!(s.interaction().resize_direction_code(), 7);

        s.handle_pointer(PointerEvent::Dragged(p(357.0, 366.0)), &cfg);
        let img = s.placed_image().unwrap();
        assert_eq!((img.width, img.height), (110.0, 120.0));

        s.handle_pointer(PointerEvent::Dragged(p(0.0, 0.0)), &cfg);
        let img = s.placed_image().unwrap();
        assert_eq!((img.width, img.height), (20.0, 20.0));

        s.handle_pointer(PointerEvent::Released(p(0.0, 0.0)), &cfg);
        assert_eq!(s.interaction_state(), InteractionState::Idle);
    }

    #[test]
    fn test_image_tool_outside_image_opens_file() {
        let mut s = session();
        let cfg = tool(ToolKind::Image);
        s.place_image(square_image(400), p(300.0, 300.0));

        s.handle_pointer(PointerEvent::Pressed(p(10.0, 10.0)), &cfg);
        assert_eq!(s.interaction_state(), InteractionState::Idle);
        let outcome = s.handle_pointer(PointerEvent::Released(p(10.0, 10.0)), &cfg);
        assert!(matches!(outcome, InteractionOutcome::OpenFile { kind: FileKind::Image, .. }));
    }

    #[test]
    fn test_drag_without_press_ignored() {
        let mut s = session();
        let cfg = tool(ToolKind::Draw);
        assert_eq!(
            s.handle_pointer(PointerEvent::Dragged(p(1.0, 1.0)), &cfg),
            InteractionOutcome::None
        );
        assert_eq!(
            s.handle_pointer(PointerEvent::Released(p(1.0, 1.0)), &cfg),
            InteractionOutcome::None
        );
        assert!(s.surface().ops().is_empty());
    }

    #[test]
    fn test_press_without_release_keeps_open_request() {
        let mut s = session();
        s.handle_pointer(PointerEvent::Pressed(p(200.0, 120.0)), &tool(ToolKind::Audio));

        // The release was lost; the next press finishes the audio gesture.
        let outcome = s.handle_pointer(PointerEvent::Pressed(p(10.0, 10.0)), &tool(ToolKind::Draw));
        assert_eq!(
            outcome,
            InteractionOutcome::OpenFile {
                kind: FileKind::Audio,
                at: p(200.0, 120.0)
            }
        );
        assert_eq!(s.interaction_state(), InteractionState::Drawing);
        assert_eq!(s.interaction().origin(), Some(p(10.0, 10.0)));
    }

    #[test]
    fn test_press_without_release_commits_stroke() {
        let mut s = session();
        let draw = tool(ToolKind::Draw);
        s.handle_pointer(PointerEvent::Pressed(p(10.0, 10.0)), &draw);
        s.handle_pointer(PointerEvent::Dragged(p(20.0, 10.0)), &draw);

        let outcome = s.handle_pointer(PointerEvent::Pressed(p(50.0, 50.0)), &tool(ToolKind::Eraser));
        assert_eq!(outcome, InteractionOutcome::Committed);
        assert_eq!(s.history().undo_len(), 2);
    }

    #[test]
    fn test_outcome_merge_priority() {
        let open = InteractionOutcome::OpenFile {
            kind: FileKind::Video,
            at: p(1.0, 2.0),
        };
        assert_eq!(InteractionOutcome::Changed.merge(open), open);
        assert_eq!(open.merge(InteractionOutcome::Committed), open);
        assert_eq!(
            InteractionOutcome::Changed.merge(InteractionOutcome::Committed),
            InteractionOutcome::Committed
        );
        assert_eq!(
            InteractionOutcome::None.merge(InteractionOutcome::Changed),
            InteractionOutcome::Changed
        );
        assert_eq!(
            InteractionOutcome::None.merge(InteractionOutcome::None),
            InteractionOutcome::None
        );
    }

    #[test]
    fn test_image_tool_drag_off_image_does_nothing() {
        let mut s = session();
        let cfg = tool(ToolKind::Image);
        s.place_image(square_image(400), p(300.0, 300.0));
        let ops_before = s.surface().ops().len();

        s.handle_pointer(PointerEvent::Pressed(p(10.0, 10.0)), &cfg);
        let outcome = s.handle_pointer(PointerEvent::Dragged(p(40.0, 40.0)), &cfg);
        assert_eq!(outcome, InteractionOutcome::None);
        assert_eq!(s.surface().ops().len(), ops_before);
        assert_eq!(s.placed_image().unwrap().position, p(250.0, 250.0));
    }

    #[test]
    fn test_tool_fixed_for_whole_gesture() {
        let mut s = session();
        s.handle_pointer(PointerEvent::Pressed(p(10.0, 10.0)), &tool(ToolKind::Line));
        // Switching tools mid-drag does not change the gesture.
        s.handle_pointer(PointerEvent::Dragged(p(50.0, 50.0)), &tool(ToolKind::Audio));
        assert_eq!(s.interaction_state(), InteractionState::ShapingPreview);
        let outcome = s.handle_pointer(PointerEvent::Released(p(50.0, 50.0)), &tool(ToolKind::Audio));
        assert_eq!(outcome, InteractionOutcome::Committed);
    }
}
