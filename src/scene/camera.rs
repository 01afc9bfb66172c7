//! Orbit camera driven by mouse callbacks

use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3};

use crate::app::events::{EventsCallbacks, MouseButton};

/// Closest the camera may get to the origin
pub const MIN_DISTANCE: f32 = 0.5;
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;
/// Distance multiplier per scroll line
const ZOOM_STEP: f32 = 0.9;

/// Camera orbiting the origin, Y up
#[derive(Debug, Clone)]
pub struct Camera {
    /// Rotation around the Y axis in radians
    pub yaw: f32,
    /// Elevation above the XZ plane in radians
    pub pitch: f32,
    pub distance: f32,
    /// Radians per screen coordinate of drag
    pub sensitivity: f32,
    drag_origin: Option<Vec2>,
    revision: u64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(6.0)
    }
}

impl Camera {
    pub fn new(distance: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: distance.max(MIN_DISTANCE),
            sensitivity: 0.01,
            drag_origin: None,
            revision: 0,
        }
    }

    /// Eye position in world space
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Bumped every time the view changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn start_drag(&mut self, position: Vec2) {
        self.drag_origin = Some(position);
    }

    pub fn stop_drag(&mut self) {
        self.drag_origin = None;
    }

    /// Rotates by the cursor motion since the last call while dragging
    pub fn drag_to(&mut self, position: Vec2) {
        let Some(origin) = self.drag_origin else {
            return;
        };
        let delta = position - origin;
        self.drag_origin = Some(position);
        if delta == Vec2::ZERO {
            return;
        }

        self.yaw -= delta.x * self.sensitivity;
        self.pitch = (self.pitch + delta.y * self.sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
        self.revision += 1;
    }

    /// Positive lines move closer
    pub fn zoom(&mut self, lines: f32) {
        if lines == 0.0 {
            return;
        }
        self.distance = (self.distance * ZOOM_STEP.powf(lines)).max(MIN_DISTANCE);
        self.revision += 1;
    }

    /// Callback table steering a shared camera: left-drag rotates, scroll zooms
    pub fn events_callbacks(camera: &Rc<RefCell<Camera>>) -> EventsCallbacks {
        let pressed = Rc::clone(camera);
        let released = Rc::clone(camera);
        let moved = Rc::clone(camera);
        let scrolled = Rc::clone(camera);

        EventsCallbacks::new()
            .on_mouse_pressed(move |e| {
                if e.button == MouseButton::Left {
                    pressed.borrow_mut().start_drag(e.position);
                }
            })
            .on_mouse_released(move |e| {
                if e.button == MouseButton::Left {
                    released.borrow_mut().stop_drag();
                }
            })
            .on_mouse_moved(move |e| moved.borrow_mut().drag_to(e.position))
            .on_scroll(move |e| scrolled.borrow_mut().zoom(e.scroll))
    }
}
