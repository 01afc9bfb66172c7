//! Window event callbacks
//!
//! Application code registers tables of optional handlers; the dispatcher
//! translates raw winit events and forwards them to every table.
//!
//! ```text
//! winit WindowEvent → EventDispatcher::translate → Event
//!                                                   ↓
//!                                   EventsCallbacks (registration order)
//! ```

mod callbacks;
mod dispatcher;
mod types;

pub use callbacks::{Callback, EventsCallbacks};
pub use dispatcher::EventDispatcher;
pub use types::{
    Event, FramebufferResizedEvent, Modifiers, MouseButton, MouseMoveEvent, MousePressedEvent,
    MouseReleasedEvent, ScrollEvent, WindowResizedEvent,
};
