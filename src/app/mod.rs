//! Application shell
//!
//! Owns the window, the event callback tables, the renderer and the frame loop.

pub mod config;
pub mod context;
pub mod debug_ui;
pub mod events;
pub mod frame_stats;
pub mod renderer;
mod runner;
mod window;

pub use config::{AppConfig, WindowConfig};
pub use context::WindowContext;
pub use runner::App;
pub use window::{frame_title, window_attributes_from_config};
