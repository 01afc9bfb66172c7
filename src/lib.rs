//! Cube Starter
//!
//! A minimal real-time rendering demo built with winit, wgpu and egui: a
//! textured rotating cube, an orbit camera and a few example widgets.

/// Application shell - windowing, event callbacks, rendering and debug UI
pub mod app;

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// Startup diagnostics that run without opening a window
pub mod health;

/// Tracing subscriber setup
pub mod logging;

/// Demo content - cube geometry, camera, per-frame seeds and widgets
pub mod scene;
