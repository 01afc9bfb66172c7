//! Built-in health checks for core systems

pub mod build_info;
pub mod config;
pub mod debug_ui;
pub mod graphics_backend;
pub mod gui_overlay;
pub mod scene;
pub mod shader_sources;
pub mod system_info;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use debug_ui::DebugUICheck;
pub use graphics_backend::GraphicsBackendCheck;
pub use gui_overlay::GuiOverlayCheck;
pub use scene::SceneCheck;
pub use shader_sources::ShaderSourcesCheck;
pub use system_info::SystemInfoCheck;
