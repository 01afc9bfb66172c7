//! Window attributes and title formatting

use super::config::WindowConfig;
use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let mut attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_decorations(config.decorated);

    if config.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    attrs
}

/// Per-frame window title with frame timing and graphics backend
///
/// Example: `MY SUPER RENDERING TP 16.667 ms/frame (60 FPS) => winit 0.30 Vulkan`
pub fn frame_title(prefix: &str, fps: f32, backend: &str) -> String {
    let ms_per_frame = if fps > 0.0 { 1000.0 / fps } else { 0.0 };
    format!(
        "{} {:.3} ms/frame ({} FPS) => winit 0.30 {}",
        prefix, ms_per_frame, fps as i32, backend
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_title_format() {
        let title = frame_title("TP", 50.0, "Gl");
        assert_eq!(title, "TP 20.000 ms/frame (50 FPS) => winit 0.30 Gl");
    }

    #[test]
    fn test_frame_title_before_first_sample() {
        let title = frame_title("TP", 0.0, "Vulkan");
        assert!(title.starts_with("TP 0.000 ms/frame (0 FPS)"));
    }
}
