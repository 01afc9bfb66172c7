//! Window context: the window handle, the registered callbacks and frame timing
//!
//! The context is created once the event loop hands out a window and is owned
//! by the application loop. Dropping it releases the window.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use super::config::{InputConfig, WindowConfig};
use super::events::{EventDispatcher, EventsCallbacks};
use super::window::window_attributes_from_config;

/// Per-frame timing derived from a monotonic clock
#[derive(Debug, Clone)]
pub struct FrameTiming {
    start: Instant,
    last_time: f32,
    delta_time: f32,
    is_first_frame: bool,
}

impl FrameTiming {
    /// Starts the clock now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_time: 0.0,
            delta_time: 0.0,
            is_first_frame: true,
        }
    }

    /// Seconds since the clock started
    pub fn time_in_seconds(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Seconds between the two most recent frames, 0 during the first frame
    pub fn delta_time_in_seconds(&self) -> f32 {
        self.delta_time
    }

    pub fn is_first_frame(&self) -> bool {
        self.is_first_frame
    }

    /// Advances to the current clock time
    pub fn advance(&mut self) {
        let now = self.time_in_seconds();
        self.advance_to(now);
    }

    /// Advances to an explicit timestamp (seconds since start)
    pub fn advance_to(&mut self, time: f32) {
        if !self.is_first_frame {
            self.delta_time = time - self.last_time;
        }
        self.last_time = time;
        self.is_first_frame = false;
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

/// Width over height, 1.0 for a degenerate (minimized) surface
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// Owns the window, the event callbacks and the frame clock
pub struct WindowContext {
    window: Arc<Window>,
    events: EventDispatcher,
    timing: FrameTiming,
    close_requested: bool,
}

impl WindowContext {
    /// Creates the window described by the configuration
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
        input: &InputConfig,
    ) -> Result<Self, OsError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(config))?);
        let size = window.inner_size();
        info!(
            window.width = size.width,
            window.height = size.height,
            window.scale_factor = window.scale_factor(),
            "Window created successfully"
        );

        let events = EventDispatcher::new(window.scale_factor(), input.forward_gui_captured_events);

        let context = Self {
            window,
            events,
            timing: FrameTiming::new(),
            close_requested: false,
        };
        if config.maximized {
            context.maximize_window();
        }
        Ok(context)
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn maximize_window(&self) {
        debug!("Maximizing window");
        self.window.set_maximized(true);
    }

    /// Replaces the registered callback tables
    pub fn set_events_callbacks(&mut self, callbacks: Vec<EventsCallbacks>) {
        self.events.set_events_callbacks(callbacks);
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// Forwards a window event to the registered callbacks
    pub fn handle_window_event(&mut self, event: &WindowEvent, gui_consumed: bool) -> usize {
        self.events.handle_window_event(event, gui_consumed)
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Starts a new frame: updates the timing and reports whether the loop should continue
    pub fn window_is_open(&mut self) -> bool {
        self.timing.advance();
        !self.close_requested
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    pub fn framebuffer_width_in_pixels(&self) -> u32 {
        self.window.inner_size().width
    }

    pub fn framebuffer_height_in_pixels(&self) -> u32 {
        self.window.inner_size().height
    }

    pub fn framebuffer_aspect_ratio(&self) -> f32 {
        let size = self.window.inner_size();
        aspect_ratio(size.width, size.height)
    }

    pub fn window_width_in_screen_coordinates(&self) -> u32 {
        self.logical_size().0
    }

    pub fn window_height_in_screen_coordinates(&self) -> u32 {
        self.logical_size().1
    }

    pub fn window_aspect_ratio(&self) -> f32 {
        let (width, height) = self.logical_size();
        aspect_ratio(width, height)
    }

    fn logical_size(&self) -> (u32, u32) {
        let logical = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        (logical.width.round() as u32, logical.height.round() as u32)
    }

    pub fn time_in_seconds(&self) -> f32 {
        self.timing.time_in_seconds()
    }

    pub fn delta_time_in_seconds(&self) -> f32 {
        self.timing.delta_time_in_seconds()
    }

    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut timing = FrameTiming::new();
        assert!(timing.is_first_frame());

        timing.advance_to(5.0);
        assert_eq!(timing.delta_time_in_seconds(), 0.0);
        assert!(!timing.is_first_frame());
    }

    #[test]
    fn test_delta_is_difference_between_frames() {
        let mut timing = FrameTiming::new();
        timing.advance_to(1.0);
        timing.advance_to(1.25);
        assert_eq!(timing.delta_time_in_seconds(), 0.25);
        timing.advance_to(2.0);
        assert_eq!(timing.delta_time_in_seconds(), 0.75);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let timing = FrameTiming::new();
        let a = timing.time_in_seconds();
        let b = timing.time_in_seconds();
        assert!(b >= a);
    }

    #[test]
    fn test_aspect_ratio_handles_zero_height() {
        assert_eq!(aspect_ratio(1280, 720), 1280.0 / 720.0);
        assert_eq!(aspect_ratio(800, 0), 1.0);
    }
}
