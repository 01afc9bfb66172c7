//! Event payloads forwarded to application callbacks

use glam::Vec2;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        use winit::event::MouseButton as WB;
        match button {
            WB::Left => Self::Left,
            WB::Right => Self::Right,
            WB::Middle => Self::Middle,
            WB::Back => Self::Back,
            WB::Forward => Self::Forward,
            WB::Other(code) => Self::Other(code),
        }
    }
}

/// Keyboard modifiers held while a button changed state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl From<winit::keyboard::ModifiersState> for Modifiers {
    fn from(state: winit::keyboard::ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}

/// Cursor moved; position in screen coordinates from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MousePressedEvent {
    pub position: Vec2,
    pub button: MouseButton,
    pub mods: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseReleasedEvent {
    pub position: Vec2,
    pub button: MouseButton,
    pub mods: Modifiers,
}

/// Wheel offsets in lines; positive `scroll` is away from the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub scroll: f32,
    pub horizontal_scroll: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferResizedEvent {
    pub width_in_pixels: u32,
    pub height_in_pixels: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowResizedEvent {
    pub width_in_screen_coordinates: u32,
    pub height_in_screen_coordinates: u32,
}

/// Any event the dispatcher can forward
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    MouseMoved(MouseMoveEvent),
    MousePressed(MousePressedEvent),
    MouseReleased(MouseReleasedEvent),
    Scroll(ScrollEvent),
    FramebufferResized(FramebufferResizedEvent),
    WindowResized(WindowResizedEvent),
}

impl Event {
    /// Events produced by the mouse or the wheel
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::MouseMoved(_) | Self::MousePressed(_) | Self::MouseReleased(_) | Self::Scroll(_)
        )
    }
}
