//! iced canvas adapter: turns mouse and touch events into [`PointerEvent`]s
//! and draws whatever the engine's [`Scene`] provides.

use crate::input::{Pointer, PointerEvent, PointerPhase};
use iced::widget::canvas;
use iced::{mouse, touch, Element, Event, Length, Point, Rectangle, Renderer, Size, Theme};

/// Geometry source for the render surface, usually implemented by the engine
/// that the controller drives.
pub trait Scene {
    fn geometry(&self, renderer: &Renderer, size: Size) -> Vec<canvas::Geometry>;
}

/// Per-widget state kept in iced's widget tree.
#[derive(Debug, Default)]
pub struct CanvasState {
    /// Left button went down inside the surface and has not been released.
    pub mouse_down: bool,
    /// Finger that went down inside the surface and still owns touch input.
    pub finger: Option<touch::Finger>,
}

/// A square canvas showing a [`Scene`] and publishing pointer input.
pub struct GraphCanvas<'a, S, Message> {
    scene: &'a S,
    on_pointer: Option<Box<dyn Fn(PointerEvent) -> Message + 'a>>,
}

impl<'a, S, Message> GraphCanvas<'a, S, Message>
where
    S: Scene + 'a,
    Message: 'a,
{
    pub fn new(scene: &'a S) -> Self {
        Self {
            scene,
            on_pointer: None,
        }
    }

    /// Sets the message produced for every pointer event on the surface.
    pub fn on_pointer(mut self, f: impl Fn(PointerEvent) -> Message + 'a) -> Self {
        self.on_pointer = Some(Box::new(f));
        self
    }

    /// Wraps the canvas in a fixed square of `side` pixels.
    pub fn into_element(self, side: f32) -> Element<'a, Message> {
        canvas::Canvas::new(self)
            .width(Length::Fixed(side))
            .height(Length::Fixed(side))
            .into()
    }
}

impl<S, Message> GraphCanvas<'_, S, Message> {
    fn publish(
        &self,
        pointer: Pointer,
        phase: PointerPhase,
        relative: Point,
        bounds: Rectangle,
    ) -> Option<canvas::Action<Message>> {
        let on_pointer = self.on_pointer.as_ref()?;
        // iced's y axis points down; the surface's points up.
        let event = PointerEvent::new(
            pointer,
            phase,
            f64::from(relative.x),
            f64::from(bounds.height - relative.y),
        );
        Some(canvas::Action::publish((on_pointer)(event)).and_capture())
    }
}

fn relative_to(position: Point, bounds: Rectangle) -> Point {
    Point::new(position.x - bounds.x, position.y - bounds.y)
}

impl<S: Scene, Message> canvas::Program<Message> for GraphCanvas<'_, S, Message> {
    type State = CanvasState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            // ---- Mouse ----
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let pos = cursor.position_in(bounds)?;
                state.mouse_down = true;
                self.publish(Pointer::Mouse, PointerPhase::Begin, pos, bounds)
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) if state.mouse_down => {
                let relative = relative_to(*position, bounds);
                if bounds.contains(*position) {
                    self.publish(Pointer::Mouse, PointerPhase::Move, relative, bounds)
                } else {
                    // Leaving the surface ends the drag.
                    state.mouse_down = false;
                    self.publish(Pointer::Mouse, PointerPhase::End, relative, bounds)
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) if state.mouse_down => {
                state.mouse_down = false;
                let relative = cursor
                    .position()
                    .map(|p| relative_to(p, bounds))
                    .unwrap_or(Point::ORIGIN);
                self.publish(Pointer::Mouse, PointerPhase::End, relative, bounds)
            }
            Event::Mouse(mouse::Event::CursorLeft) if state.mouse_down => {
                state.mouse_down = false;
                self.publish(Pointer::Mouse, PointerPhase::End, Point::ORIGIN, bounds)
            }

            // ---- Touch ----
            Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if state.finger.is_some() || !bounds.contains(*position) {
                    return None;
                }
                state.finger = Some(*id);
                let relative = relative_to(*position, bounds);
                self.publish(Pointer::Touch(id.0), PointerPhase::Begin, relative, bounds)
            }
            Event::Touch(touch::Event::FingerMoved { id, position })
                if state.finger == Some(*id) =>
            {
                let relative = relative_to(*position, bounds);
                self.publish(Pointer::Touch(id.0), PointerPhase::Move, relative, bounds)
            }
            Event::Touch(touch::Event::FingerLifted { id, position })
                if state.finger == Some(*id) =>
            {
                state.finger = None;
                let relative = relative_to(*position, bounds);
                self.publish(Pointer::Touch(id.0), PointerPhase::End, relative, bounds)
            }
            Event::Touch(touch::Event::FingerLost { id, position })
                if state.finger == Some(*id) =>
            {
                state.finger = None;
                let relative = relative_to(*position, bounds);
                self.publish(Pointer::Touch(id.0), PointerPhase::Cancel, relative, bounds)
            }

            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        self.scene.geometry(renderer, bounds.size())
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.mouse_down {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::canvas::Program;

    struct Blank;

    impl Scene for Blank {
        fn geometry(&self, _renderer: &Renderer, _size: Size) -> Vec<canvas::Geometry> {
            Vec::new()
        }
    }

    const BOUNDS: Rectangle = Rectangle {
        x: 100.0,
        y: 50.0,
        width: 10.0,
        height: 10.0,
    };

    fn feed(
        canvas: &GraphCanvas<'_, Blank, PointerEvent>,
        state: &mut CanvasState,
        event: Event,
        cursor: Point,
    ) -> Option<PointerEvent> {
        let action = canvas.update(state, &event, BOUNDS, mouse::Cursor::Available(cursor))?;
        let (message, _, status) = action.into_inner();
        assert_eq!(status, iced::event::Status::Captured);
        message
    }

    fn moved(x: f32, y: f32) -> Event {
        Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(x, y),
        })
    }

    fn pressed() -> Event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
    }

    fn finger(id: u64, x: f32, y: f32) -> (touch::Finger, Point) {
        (touch::Finger(id), Point::new(x, y))
    }

    #[test]
    fn mouse_drag_is_flipped_to_y_up() {
        let canvas = GraphCanvas::new(&Blank).on_pointer(|e| e);
        let mut state = CanvasState::default();

        let begin = feed(&canvas, &mut state, pressed(), Point::new(102.0, 58.0));
        assert_eq!(begin, Some(PointerEvent::mouse(PointerPhase::Begin, 2.0, 2.0)));
        assert!(state.mouse_down);

        let position = Point::new(107.0, 51.0);
        let step = feed(&canvas, &mut state, moved(107.0, 51.0), position);
        assert_eq!(step, Some(PointerEvent::mouse(PointerPhase::Move, 7.0, 9.0)));
    }

    #[test]
    fn leaving_the_surface_ends_the_drag() {
        let canvas = GraphCanvas::new(&Blank).on_pointer(|e| e);
        let mut state = CanvasState::default();

        feed(&canvas, &mut state, pressed(), Point::new(102.0, 58.0));
        let outside = Point::new(300.0, 50.0);
        let end = feed(&canvas, &mut state, moved(300.0, 50.0), outside);
        assert_eq!(end, Some(PointerEvent::mouse(PointerPhase::End, 200.0, 10.0)));
        assert!(!state.mouse_down);

        feed(&canvas, &mut state, pressed(), Point::new(102.0, 58.0));
        let left = feed(
            &canvas,
            &mut state,
            Event::Mouse(mouse::Event::CursorLeft),
            outside,
        );
        assert_eq!(left.map(|e| e.phase), Some(PointerPhase::End));
        assert!(!state.mouse_down);
    }

    #[test]
    fn press_outside_is_not_captured() {
        let canvas = GraphCanvas::new(&Blank).on_pointer(|e| e);
        let mut state = CanvasState::default();

        let outside = Point::new(10.0, 10.0);
        assert!(canvas
            .update(&mut state, &pressed(), BOUNDS, mouse::Cursor::Available(outside))
            .is_none());
        assert!(!state.mouse_down);

        let (id, position) = finger(1, 10.0, 10.0);
        let touch = Event::Touch(touch::Event::FingerPressed { id, position });
        assert!(canvas
            .update(&mut state, &touch, BOUNDS, mouse::Cursor::Unavailable)
            .is_none());
        assert_eq!(state.finger, None);
    }

    #[test]
    fn only_the_owning_finger_is_published() {
        let canvas = GraphCanvas::new(&Blank).on_pointer(|e| e);
        let mut state = CanvasState::default();
        let cursor = Point::ORIGIN;

        let (id, position) = finger(1, 105.0, 55.0);
        let begin = feed(
            &canvas,
            &mut state,
            Event::Touch(touch::Event::FingerPressed { id, position }),
            cursor,
        );
        assert_eq!(begin, Some(PointerEvent::touch(1, PointerPhase::Begin, 5.0, 5.0)));

        let (other, position) = finger(2, 20.0, 20.0);
        for event in [
            touch::Event::FingerMoved { id: other, position },
            touch::Event::FingerLifted { id: other, position },
        ] {
            assert!(canvas
                .update(&mut state, &Event::Touch(event), BOUNDS, mouse::Cursor::Unavailable)
                .is_none());
        }

        let (id, position) = finger(1, 106.0, 55.0);
        let end = feed(
            &canvas,
            &mut state,
            Event::Touch(touch::Event::FingerLifted { id, position }),
            cursor,
        );
        assert_eq!(end, Some(PointerEvent::touch(1, PointerPhase::End, 6.0, 5.0)));
        assert_eq!(state.finger, None);
    }
}
