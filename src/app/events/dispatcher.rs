//! Translation of winit window events and fan-out to registered callbacks

use glam::Vec2;
use tracing::trace;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};

use super::callbacks::EventsCallbacks;
use super::types::{
    Event, FramebufferResizedEvent, Modifiers, MouseMoveEvent, MousePressedEvent,
    MouseReleasedEvent, ScrollEvent, WindowResizedEvent,
};

/// Pixels per wheel line when a touchpad reports pixel deltas
const PIXELS_PER_LINE: f32 = 20.0;

/// Forwards windowing events to every registered callback table
///
/// Tables are invoked in registration order. Press and release events carry
/// the last cursor position seen, since winit does not attach one.
pub struct EventDispatcher {
    callbacks: Vec<EventsCallbacks>,
    cursor_position: Vec2,
    modifiers: Modifiers,
    scale_factor: f64,
    forward_gui_captured: bool,
}

impl EventDispatcher {
    /// Creates a dispatcher with no callbacks registered
    pub fn new(scale_factor: f64, forward_gui_captured: bool) -> Self {
        Self {
            callbacks: Vec::new(),
            cursor_position: Vec2::ZERO,
            modifiers: Modifiers::default(),
            scale_factor,
            forward_gui_captured,
        }
    }

    /// Replaces the whole callback set
    pub fn set_events_callbacks(&mut self, callbacks: Vec<EventsCallbacks>) {
        self.callbacks = callbacks;
    }

    /// Appends one callback table after the existing ones
    pub fn add_events_callbacks(&mut self, callbacks: EventsCallbacks) {
        self.callbacks.push(callbacks);
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    /// Last cursor position in screen coordinates
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    /// Translates a window event and dispatches the result
    ///
    /// `gui_consumed` is the overlay's verdict for this event. Pointer events
    /// it consumed are withheld unless forwarding of captured events is on.
    /// Button releases are always dispatched. Returns the number of events
    /// dispatched.
    pub fn handle_window_event(&mut self, event: &WindowEvent, gui_consumed: bool) -> usize {
        let events = self.translate(event);
        let mut dispatched = 0;
        for event in &events {
            if gui_consumed && self.withholds(event) {
                trace!(?event, "Withholding event captured by the GUI");
                continue;
            }
            self.dispatch(event);
            dispatched += 1;
        }
        dispatched
    }

    /// A release must reach the callbacks even over the GUI, or a drag that
    /// started on the scene never ends.
    fn withholds(&self, event: &Event) -> bool {
        !self.forward_gui_captured
            && event.is_pointer()
            && !matches!(event, Event::MouseReleased(_))
    }

    /// Converts a winit event into zero or more callback events
    ///
    /// Also tracks the cursor position, modifiers and scale factor.
    pub fn translate(&mut self, event: &WindowEvent) -> Vec<Event> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let scale = self.scale_factor as f32;
                self.cursor_position =
                    Vec2::new(position.x as f32 / scale, position.y as f32 / scale);
                vec![Event::MouseMoved(MouseMoveEvent {
                    position: self.cursor_position,
                })]
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let position = self.cursor_position;
                let button = (*button).into();
                let mods = self.modifiers;
                match state {
                    ElementState::Pressed => vec![Event::MousePressed(MousePressedEvent {
                        position,
                        button,
                        mods,
                    })],
                    ElementState::Released => vec![Event::MouseReleased(MouseReleasedEvent {
                        position,
                        button,
                        mods,
                    })],
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let (horizontal_scroll, scroll) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                    MouseScrollDelta::PixelDelta(pos) => (
                        pos.x as f32 / PIXELS_PER_LINE,
                        pos.y as f32 / PIXELS_PER_LINE,
                    ),
                };
                vec![Event::Scroll(ScrollEvent {
                    scroll,
                    horizontal_scroll,
                })]
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state().into();
                Vec::new()
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor);
                Vec::new()
            }

            WindowEvent::Resized(size) => {
                let logical = size.to_logical::<f64>(self.scale_factor);
                vec![
                    Event::FramebufferResized(FramebufferResizedEvent {
                        width_in_pixels: size.width,
                        height_in_pixels: size.height,
                    }),
                    Event::WindowResized(WindowResizedEvent {
                        width_in_screen_coordinates: logical.width.round() as u32,
                        height_in_screen_coordinates: logical.height.round() as u32,
                    }),
                ]
            }

            _ => Vec::new(),
        }
    }

    /// Calls every registered table with the event
    pub fn dispatch(&mut self, event: &Event) {
        for callbacks in &mut self.callbacks {
            callbacks.call(event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(1.0, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::types::MouseButton;
    use std::cell::RefCell;
    use std::rc::Rc;
    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::event::{DeviceId, TouchPhase};

    fn device() -> DeviceId {
        // SAFETY: the id is only compared, never passed back to the platform
        unsafe { DeviceId::dummy() }
    }

    fn cursor_moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(x, y),
        }
    }

    fn mouse_input(state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: device(),
            state,
            button: winit::event::MouseButton::Left,
        }
    }

    #[test]
    fn test_press_carries_last_cursor_position() {
        let mut dispatcher = EventDispatcher::default();
        dispatcher.translate(&cursor_moved(10.0, 20.0));
        let events = dispatcher.translate(&mouse_input(ElementState::Pressed));

        assert_eq!(
            events,
            vec![Event::MousePressed(MousePressedEvent {
                position: Vec2::new(10.0, 20.0),
                button: MouseButton::Left,
                mods: Modifiers::default(),
            })]
        );
    }

    #[test]
    fn test_cursor_position_is_in_screen_coordinates() {
        let mut dispatcher = EventDispatcher::new(2.0, true);
        dispatcher.translate(&cursor_moved(100.0, 50.0));
        assert_eq!(dispatcher.cursor_position(), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_wheel_axes_map_to_scroll_fields() {
        let mut dispatcher = EventDispatcher::default();
        let events = dispatcher.translate(&WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::LineDelta(-1.0, 2.0),
            phase: TouchPhase::Moved,
        });
        assert_eq!(
            events,
            vec![Event::Scroll(ScrollEvent {
                scroll: 2.0,
                horizontal_scroll: -1.0,
            })]
        );

        let events = dispatcher.translate(&WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0)),
            phase: TouchPhase::Moved,
        });
        assert_eq!(
            events,
            vec![Event::Scroll(ScrollEvent {
                scroll: 2.0,
                horizontal_scroll: 0.0,
            })]
        );
    }

    #[test]
    fn test_resize_reports_pixels_and_screen_coordinates() {
        let mut dispatcher = EventDispatcher::new(2.0, true);
        let events = dispatcher.translate(&WindowEvent::Resized(PhysicalSize::new(1600, 900)));
        assert_eq!(
            events,
            vec![
                Event::FramebufferResized(FramebufferResizedEvent {
                    width_in_pixels: 1600,
                    height_in_pixels: 900,
                }),
                Event::WindowResized(WindowResizedEvent {
                    width_in_screen_coordinates: 800,
                    height_in_screen_coordinates: 450,
                }),
            ]
        );
    }

    #[test]
    fn test_every_table_receives_events_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::default();
        dispatcher.set_events_callbacks(vec![
            EventsCallbacks::new().on_mouse_moved({
                let log = log.clone();
                move |_| log.borrow_mut().push("first")
            }),
            EventsCallbacks::new().on_mouse_moved({
                let log = log.clone();
                move |_| log.borrow_mut().push("second")
            }),
        ]);

        let dispatched = dispatcher.handle_window_event(&cursor_moved(1.0, 1.0), false);
        assert_eq!(dispatched, 1);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_set_events_callbacks_replaces_previous_set() {
        let mut dispatcher = EventDispatcher::default();
        dispatcher.add_events_callbacks(EventsCallbacks::new());
        dispatcher.add_events_callbacks(EventsCallbacks::new());
        assert_eq!(dispatcher.callback_count(), 2);

        dispatcher.set_events_callbacks(vec![EventsCallbacks::new()]);
        assert_eq!(dispatcher.callback_count(), 1);
    }

    #[test]
    fn test_gui_captured_pointer_events_can_be_withheld() {
        let moves = Rc::new(RefCell::new(0));
        let resizes = Rc::new(RefCell::new(0));
        let mut dispatcher = EventDispatcher::new(1.0, false);
        dispatcher.set_events_callbacks(vec![
            EventsCallbacks::new()
                .on_mouse_moved({
                    let moves = moves.clone();
                    move |_| *moves.borrow_mut() += 1
                })
                .on_framebuffer_resized({
                    let resizes = resizes.clone();
                    move |_| *resizes.borrow_mut() += 1
                }),
        ]);

        assert_eq!(dispatcher.handle_window_event(&cursor_moved(1.0, 1.0), true), 0);
        assert_eq!(
            dispatcher.handle_window_event(&WindowEvent::Resized(PhysicalSize::new(10, 10)), true),
            2
        );
        assert_eq!(*moves.borrow(), 0);
        assert_eq!(*resizes.borrow(), 1);

        // Cursor tracking still happens for withheld events
        assert_eq!(dispatcher.cursor_position(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_release_over_gui_is_still_dispatched() {
        let releases = Rc::new(RefCell::new(0));
        let moves = Rc::new(RefCell::new(0));
        let mut dispatcher = EventDispatcher::new(1.0, false);
        dispatcher.set_events_callbacks(vec![
            EventsCallbacks::new()
                .on_mouse_released({
                    let releases = releases.clone();
                    move |_| *releases.borrow_mut() += 1
                })
                .on_mouse_moved({
                    let moves = moves.clone();
                    move |_| *moves.borrow_mut() += 1
                }),
        ]);

        assert_eq!(dispatcher.handle_window_event(&mouse_input(ElementState::Pressed), false), 1);
        assert_eq!(dispatcher.handle_window_event(&mouse_input(ElementState::Released), true), 1);
        assert_eq!(dispatcher.handle_window_event(&cursor_moved(5.0, 5.0), true), 0);

        assert_eq!(*releases.borrow(), 1);
        assert_eq!(*moves.borrow(), 0);
    }
}
