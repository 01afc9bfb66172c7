//! Callback table registered by application code

use super::types::{
    Event, FramebufferResizedEvent, MouseMoveEvent, MousePressedEvent, MouseReleasedEvent,
    ScrollEvent, WindowResizedEvent,
};

/// Boxed handler for one event kind
pub type Callback<E> = Box<dyn FnMut(&E)>;

/// One set of optional handlers, one per event kind
///
/// Unset handlers are skipped. Tables are built with the `on_*` methods:
///
/// ```ignore
/// let callbacks = EventsCallbacks::new()
///     .on_mouse_pressed(|e| info!(x = e.position.x, y = e.position.y, "Mouse pressed"));
/// ```
#[derive(Default)]
pub struct EventsCallbacks {
    pub on_mouse_moved: Option<Callback<MouseMoveEvent>>,
    pub on_mouse_pressed: Option<Callback<MousePressedEvent>>,
    pub on_mouse_released: Option<Callback<MouseReleasedEvent>>,
    pub on_scroll: Option<Callback<ScrollEvent>>,
    pub on_framebuffer_resized: Option<Callback<FramebufferResizedEvent>>,
    pub on_window_resized: Option<Callback<WindowResizedEvent>>,
}

impl EventsCallbacks {
    /// Creates a table with no handlers
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_mouse_moved(mut self, f: impl FnMut(&MouseMoveEvent) + 'static) -> Self {
        self.on_mouse_moved = Some(Box::new(f));
        self
    }

    pub fn on_mouse_pressed(mut self, f: impl FnMut(&MousePressedEvent) + 'static) -> Self {
        self.on_mouse_pressed = Some(Box::new(f));
        self
    }

    pub fn on_mouse_released(mut self, f: impl FnMut(&MouseReleasedEvent) + 'static) -> Self {
        self.on_mouse_released = Some(Box::new(f));
        self
    }

    pub fn on_scroll(mut self, f: impl FnMut(&ScrollEvent) + 'static) -> Self {
        self.on_scroll = Some(Box::new(f));
        self
    }

    pub fn on_framebuffer_resized(
        mut self,
        f: impl FnMut(&FramebufferResizedEvent) + 'static,
    ) -> Self {
        self.on_framebuffer_resized = Some(Box::new(f));
        self
    }

    pub fn on_window_resized(mut self, f: impl FnMut(&WindowResizedEvent) + 'static) -> Self {
        self.on_window_resized = Some(Box::new(f));
        self
    }

    /// Invokes the handler matching the event, if one is set
    pub fn call(&mut self, event: &Event) {
        match event {
            Event::MouseMoved(e) => {
                if let Some(f) = &mut self.on_mouse_moved {
                    f(e);
                }
            }
            Event::MousePressed(e) => {
                if let Some(f) = &mut self.on_mouse_pressed {
                    f(e);
                }
            }
            Event::MouseReleased(e) => {
                if let Some(f) = &mut self.on_mouse_released {
                    f(e);
                }
            }
            Event::Scroll(e) => {
                if let Some(f) = &mut self.on_scroll {
                    f(e);
                }
            }
            Event::FramebufferResized(e) => {
                if let Some(f) = &mut self.on_framebuffer_resized {
                    f(e);
                }
            }
            Event::WindowResized(e) => {
                if let Some(f) = &mut self.on_window_resized {
                    f(e);
                }
            }
        }
    }
}

impl std::fmt::Debug for EventsCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventsCallbacks")
            .field("on_mouse_moved", &self.on_mouse_moved.is_some())
            .field("on_mouse_pressed", &self.on_mouse_pressed.is_some())
            .field("on_mouse_released", &self.on_mouse_released.is_some())
            .field("on_scroll", &self.on_scroll.is_some())
            .field("on_framebuffer_resized", &self.on_framebuffer_resized.is_some())
            .field("on_window_resized", &self.on_window_resized.is_some())
            .finish()
    }
}
