//! Pointer and touch input translated into pans and drag lifecycle signals.
//!
//! Mouse and touch streams are unified as [`PointerEvent`]s carrying
//! surface-relative positions. The origin is the bottom-left corner of the
//! surface and y grows upward, matching the model plane, so a drag maps onto
//! a pan with the same sign on both axes.

use crate::view_rect::ViewRect;

// ================================================================================
// Events
// ================================================================================

/// Which device (and for touch, which contact) produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pointer {
    Mouse,
    Touch(u64),
}

/// Lifecycle phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Begin,
    Move,
    End,
    Cancel,
}

/// A single pointer event in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: Pointer,
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(pointer: Pointer, phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            pointer,
            phase,
            x,
            y,
        }
    }

    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self::new(Pointer::Mouse, phase, x, y)
    }

    pub fn touch(id: u64, phase: PointerPhase, x: f64, y: f64) -> Self {
        Self::new(Pointer::Touch(id), phase, x, y)
    }

    fn is_inside(&self, surface: f64) -> bool {
        (0.0..=surface).contains(&self.x) && (0.0..=surface).contains(&self.y)
    }
}

/// What the translator did with an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    /// Nothing changed.
    Ignored,
    DragStarted,
    /// The view was panned by this model-space delta.
    Panned { dx: f64, dy: f64 },
    DragEnded,
}

// ================================================================================
// Drag state machine
// ================================================================================

/// The contact owning the current drag and its last position in model units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub pointer: Pointer,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

/// Released/Dragging state machine for a single pointer stream.
#[derive(Debug, Default)]
pub struct InputTranslator {
    drag: Option<DragState>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Feeds one event through the state machine, panning `view` on drag
    /// moves.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        view: &mut ViewRect,
        surface: f64,
    ) -> InputOutcome {
        let positioned = matches!(event.phase, PointerPhase::Begin | PointerPhase::Move);
        if positioned && !(event.x.is_finite() && event.y.is_finite()) {
            return InputOutcome::Ignored;
        }

        match (event.phase, self.drag) {
            (PointerPhase::Begin, None) => {
                let (anchor_x, anchor_y) = view.to_model_units(event.x, event.y, surface);
                self.drag = Some(DragState {
                    pointer: event.pointer,
                    anchor_x,
                    anchor_y,
                });
                InputOutcome::DragStarted
            }
            // Only one contact drives a drag; extra fingers are ignored.
            (PointerPhase::Begin, Some(_)) => InputOutcome::Ignored,
            (_, Some(drag)) if drag.pointer != event.pointer => InputOutcome::Ignored,
            (PointerPhase::Move, Some(drag)) => {
                if matches!(event.pointer, Pointer::Touch(_)) && !event.is_inside(surface) {
                    // A finger that has left the surface terminates the drag.
                    self.drag = None;
                    return InputOutcome::DragEnded;
                }

                let (x, y) = view.to_model_units(event.x, event.y, surface);
                let dx = drag.anchor_x - x;
                let dy = drag.anchor_y - y;
                view.pan(dx, dy);
                self.drag = Some(DragState {
                    anchor_x: x,
                    anchor_y: y,
                    ..drag
                });
                tracing::trace!(dx, dy, "pan");
                InputOutcome::Panned { dx, dy }
            }
            (PointerPhase::End | PointerPhase::Cancel, Some(_)) => {
                self.drag = None;
                InputOutcome::DragEnded
            }
            (_, None) => InputOutcome::Ignored,
        }
    }

    /// Forcibly releases any drag in progress. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        self.drag.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_pans_by_anchor_minus_current() {
        let mut input = InputTranslator::new();
        let mut view = ViewRect::DEFAULT;
        // 10px surface over a 10 unit view: 1 unit per pixel
        let surface = 10.0;

        assert_eq!(
            input.handle(&PointerEvent::mouse(PointerPhase::Begin, 0.0, 0.0), &mut view, surface),
            InputOutcome::DragStarted
        );
        assert_eq!(
            input.handle(&PointerEvent::mouse(PointerPhase::Move, 10.0, 10.0), &mut view, surface),
            InputOutcome::Panned { dx: -10.0, dy: -10.0 }
        );
        assert_eq!(view, ViewRect::new(-15.0, -5.0, -15.0, -5.0).unwrap());
    }

    #[test]
    fn anchor_advances_incrementally() {
        let mut input = InputTranslator::new();
        let mut view = ViewRect::DEFAULT;
        let surface = 10.0;

        input.handle(&PointerEvent::mouse(PointerPhase::Begin, 2.0, 2.0), &mut view, surface);
        input.handle(&PointerEvent::mouse(PointerPhase::Move, 3.0, 2.0), &mut view, surface);
        let outcome =
            input.handle(&PointerEvent::mouse(PointerPhase::Move, 4.0, 2.0), &mut view, surface);

        assert_eq!(outcome, InputOutcome::Panned { dx: -1.0, dy: 0.0 });
        assert_eq!(view.x_min, -7.0);
        assert_eq!(input.drag().map(|d| d.anchor_x), Some(4.0));
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut input = InputTranslator::new();
        let mut view = ViewRect::DEFAULT;
        let outcome =
            input.handle(&PointerEvent::mouse(PointerPhase::Move, 5.0, 5.0), &mut view, 10.0);
        assert_eq!(outcome, InputOutcome::Ignored);
        assert_eq!(view, ViewRect::DEFAULT);
    }

    #[test]
    fn second_finger_is_ignored() {
        let mut input = InputTranslator::new();
        let mut view = ViewRect::DEFAULT;
        let surface = 100.0;

        input.handle(&PointerEvent::touch(1, PointerPhase::Begin, 50.0, 50.0), &mut view, surface);
        assert_eq!(
            input.handle(&PointerEvent::touch(2, PointerPhase::Begin, 10.0, 10.0), &mut view, surface),
            InputOutcome::Ignored
        );
        assert_eq!(
            input.handle(&PointerEvent::touch(2, PointerPhase::Move, 20.0, 20.0), &mut view, surface),
            InputOutcome::Ignored
        );
        assert_eq!(
            input.handle(&PointerEvent::touch(2, PointerPhase::End, 20.0, 20.0), &mut view, surface),
            InputOutcome::Ignored
        );
        assert!(input.is_dragging());
        assert_eq!(view, ViewRect::DEFAULT);
    }

    #[test]
    fn touch_leaving_surface_ends_drag() {
        let mut input = InputTranslator::new();
        let mut view = ViewRect::DEFAULT;
        let surface = 100.0;

        input.handle(&PointerEvent::touch(7, PointerPhase::Begin, 50.0, 50.0), &mut view, surface);
        let outcome =
            input.handle(&PointerEvent::touch(7, PointerPhase::Move, 150.0, 50.0), &mut view, surface);

        assert_eq!(outcome, InputOutcome::DragEnded);
        assert!(!input.is_dragging());
        assert_eq!(view, ViewRect::DEFAULT);
    }

    #[test]
    fn cancel_releases() {
        let mut input = InputTranslator::new();
        let mut view = ViewRect::DEFAULT;
        input.handle(&PointerEvent::mouse(PointerPhase::Begin, 1.0, 1.0), &mut view, 10.0);
        assert_eq!(
            input.handle(&PointerEvent::mouse(PointerPhase::Cancel, 1.0, 1.0), &mut view, 10.0),
            InputOutcome::DragEnded
        );
        assert!(!input.cancel());
    }

    #[test]
    fn non_finite_positions_are_ignored() {
        let mut input = InputTranslator::new();
        let mut view = ViewRect::DEFAULT;

        assert_eq!(
            input.handle(&PointerEvent::mouse(PointerPhase::Begin, f64::NAN, 1.0), &mut view, 10.0),
            InputOutcome::Ignored
        );
        assert!(!input.is_dragging());

        input.handle(&PointerEvent::mouse(PointerPhase::Begin, 1.0, 1.0), &mut view, 10.0);
        assert_eq!(
            input.handle(
                &PointerEvent::mouse(PointerPhase::Move, f64::INFINITY, 2.0),
                &mut view,
                10.0
            ),
            InputOutcome::Ignored
        );
        assert_eq!(view, ViewRect::DEFAULT);
        assert!(view.validate().is_ok());

        // End carries no position that matters.
        assert_eq!(
            input.handle(&PointerEvent::mouse(PointerPhase::End, f64::NAN, f64::NAN), &mut view, 10.0),
            InputOutcome::DragEnded
        );
    }
}
