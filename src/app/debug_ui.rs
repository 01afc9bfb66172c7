//! Debug UI state and rendering

use sysinfo::System;

use super::frame_stats::FrameStats;
use crate::scene::Camera;

/// Renderer facts shown in the debug window
#[derive(Debug, Clone)]
pub struct RendererSummary {
    pub backend: String,
    pub adapter: String,
    pub surface_width: u32,
    pub surface_height: u32,
    pub surface_format: String,
    pub program: String,
}

/// Host facts, gathered once since they do not change while running
#[derive(Debug, Clone)]
pub struct SystemSummary {
    pub os: String,
    pub kernel: String,
    pub physical_cores: usize,
    pub logical_cores: usize,
    pub total_memory_gb: f64,
}

impl SystemSummary {
    pub fn gather() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        let os_name = System::name().unwrap_or_else(|| "Unknown".to_string());
        let os_version = System::os_version().unwrap_or_else(|| "Unknown".to_string());

        Self {
            os: format!("{} {}", os_name, os_version),
            kernel: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
            physical_cores: System::physical_core_count().unwrap_or(0),
            logical_cores: sys.cpus().len(),
            total_memory_gb: sys.total_memory() as f64 / 1_073_741_824.0,
        }
    }
}

/// Debug UI state for toggling different panels
#[derive(Debug, Clone)]
pub struct DebugUIState {
    pub show_window: bool,
    pub show_fps: bool,
    pub show_camera: bool,
    pub show_renderer_info: bool,
    pub show_system_info: bool,
    system: Option<SystemSummary>,
}

impl Default for DebugUIState {
    fn default() -> Self {
        Self {
            show_window: cfg!(debug_assertions),
            show_fps: true,
            show_camera: true,
            show_renderer_info: true,
            show_system_info: true,
            system: None,
        }
    }
}

impl DebugUIState {
    /// Toggles the debug window visibility (debug builds only)
    #[cfg(debug_assertions)]
    pub fn toggle_window(&mut self) {
        self.show_window = !self.show_window;
    }

    /// Renders the debug UI
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        stats: &FrameStats,
        time_in_seconds: f32,
        camera: &Camera,
        renderer: &RendererSummary,
    ) {
        if !self.show_window {
            return;
        }

        egui::Window::new("Debug Info")
            .default_pos([10.0, 40.0])
            .default_width(300.0)
            .resizable(true)
            .scroll([false, true])
            .show(ctx, |ui| {
                ui.heading("Categories");
                ui.separator();

                ui.checkbox(&mut self.show_fps, "FPS");
                ui.checkbox(&mut self.show_camera, "Camera");
                ui.checkbox(&mut self.show_renderer_info, "Renderer Info");
                ui.checkbox(&mut self.show_system_info, "System Info");

                ui.separator();

                if self.show_fps {
                    ui.heading("FPS");
                    ui.label(format!("FPS: {:.1}", stats.fps()));
                    ui.label(format!(
                        "Frame time: {:.2}ms",
                        stats.last().unwrap_or(0.0) * 1000.0
                    ));
                    ui.label(format!("Time: {:.2}s", time_in_seconds));
                    ui.separator();
                }

                if self.show_camera {
                    ui.heading("Camera");
                    let position = camera.position();
                    ui.label(format!(
                        "Position: ({:.2}, {:.2}, {:.2})",
                        position.x, position.y, position.z
                    ));
                    ui.label(format!(
                        "Yaw: {:.1}°  Pitch: {:.1}°",
                        camera.yaw.to_degrees(),
                        camera.pitch.to_degrees()
                    ));
                    ui.label(format!("Distance: {:.2}", camera.distance));
                    ui.separator();
                }

                if self.show_renderer_info {
                    ui.heading("Renderer Info");
                    ui.label(format!("wgpu backend: {}", renderer.backend));
                    ui.label(format!("Adapter: {}", renderer.adapter));
                    ui.label(format!(
                        "Surface: {}x{}",
                        renderer.surface_width, renderer.surface_height
                    ));
                    ui.label(format!("Format: {}", renderer.surface_format));
                    ui.label(format!("Cube program: {}", renderer.program));
                    ui.separator();
                }

                if self.show_system_info {
                    ui.heading("System Info");
                    let system = self.system.get_or_insert_with(SystemSummary::gather);
                    ui.label(format!("OS: {}", system.os));
                    ui.label(format!("Kernel: {}", system.kernel));
                    ui.label(format!("Physical cores: {}", system.physical_cores));
                    ui.label(format!("Logical cores: {}", system.logical_cores));
                    ui.label(format!("Memory: {:.1} GB", system.total_memory_gb));
                    ui.separator();
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> RendererSummary {
        RendererSummary {
            backend: "Gl".into(),
            adapter: "Test Adapter".into(),
            surface_width: 640,
            surface_height: 480,
            surface_format: "Bgra8UnormSrgb".into(),
            program: "Textured".into(),
        }
    }

    #[test]
    fn test_hidden_window_draws_nothing() {
        let mut state = DebugUIState {
            show_window: false,
            ..Default::default()
        };
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            state.render(ctx, &FrameStats::new(), 0.0, &Camera::default(), &summary());
        });
        assert!(output.shapes.is_empty());
    }

    #[test]
    fn test_visible_window_renders_headless() {
        let mut state = DebugUIState {
            show_window: true,
            show_system_info: false,
            ..Default::default()
        };
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            state.render(ctx, &FrameStats::new(), 1.5, &Camera::default(), &summary());
        });
        assert!(!output.shapes.is_empty());
    }
}
