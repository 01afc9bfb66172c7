//! Demo scene: a textured cube spinning about Z under an orbit camera
//!
//! The scene owns everything the frame loop needs that is not GPU state:
//! the camera shared with the event callbacks, the random shader seeds,
//! the still-frame counter and the example GUI windows.

pub mod camera;
pub mod cube;
pub mod seeds;
pub mod widgets;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use crate::app::config::{GuiConfig, SceneConfig};
use crate::app::events::EventsCallbacks;
use crate::app::renderer::cube::CubeUniforms;
pub use camera::Camera;
pub use cube::{FrameTransforms, cube_mesh_desc};
pub use seeds::RandomSeeds;
pub use widgets::ExampleWidgets;

pub struct Scene {
    camera: Rc<RefCell<Camera>>,
    seeds: RandomSeeds,
    frames_still: u32,
    last_camera_revision: u64,
    pub widgets: ExampleWidgets,
    field_of_view_degrees: f32,
    near_plane: f32,
}

impl Scene {
    pub fn new(scene: &SceneConfig, gui: &GuiConfig) -> Self {
        Self::with_seeds(scene, gui, RandomSeeds::from_clock())
    }

    pub fn with_seeds(scene: &SceneConfig, gui: &GuiConfig, seeds: RandomSeeds) -> Self {
        Self {
            camera: Rc::new(RefCell::new(Camera::default())),
            seeds,
            frames_still: 0,
            last_camera_revision: 0,
            widgets: ExampleWidgets::new(gui.show_demo_window, gui.show_another_window),
            field_of_view_degrees: scene.field_of_view_degrees,
            near_plane: scene.near_plane,
        }
    }

    pub fn camera(&self) -> &Rc<RefCell<Camera>> {
        &self.camera
    }

    /// Camera controls plus a handler logging mouse presses
    pub fn events_callbacks(&self) -> Vec<EventsCallbacks> {
        vec![
            Camera::events_callbacks(&self.camera),
            EventsCallbacks::new().on_mouse_pressed(|e| {
                info!(x = e.position.x, y = e.position.y, button = ?e.button, "Mouse pressed");
            }),
        ]
    }

    /// Frames since the camera last moved
    pub fn frames_still(&self) -> u32 {
        self.frames_still
    }

    pub fn seeds(&self) -> &RandomSeeds {
        &self.seeds
    }

    /// Advances per-frame state: new seeds and the still-frame counter
    pub fn update(&mut self) {
        let revision = self.camera.borrow().revision();
        if revision != self.last_camera_revision {
            self.last_camera_revision = revision;
            self.frames_still = 0;
        }
        self.frames_still = self.frames_still.saturating_add(1);
        self.seeds.regenerate();
    }

    pub fn transforms(&self, time_in_seconds: f32, aspect_ratio: f32) -> FrameTransforms {
        FrameTransforms {
            time_in_seconds,
            aspect_ratio,
            field_of_view_degrees: self.field_of_view_degrees,
            near_plane: self.near_plane,
            view: self.camera.borrow().view_matrix(),
        }
    }

    pub fn uniforms(&self, time_in_seconds: f32, aspect_ratio: f32) -> CubeUniforms {
        self.transforms(time_in_seconds, aspect_ratio)
            .uniforms(self.seeds.as_uniform(), self.frames_still)
    }
}
