//! Rendering with wgpu and an egui overlay
//!
//! ## Architecture
//!
//! - `mesh`: vertex layouts, validation and GPU buffers
//! - `texture`: image decoding and sampled textures
//! - `shader`: shader sources and captured compilation errors
//! - `cube`: the textured cube pipeline and its uniforms
//! - `depth`: depth attachment sized to the surface
//! - `gui`: egui overlay bracketed by begin/end frame
//!
//! A frame is recorded in order: [`Renderer::begin_frame`], scene pass,
//! GUI pass, [`Renderer::present`].

use std::sync::Arc;

use anyhow::Context as _;
use egui::Context;
use tracing::info;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::event::WindowEvent;
use winit::window::Window;

use super::config::GraphicsConfig;

pub mod cube;
pub mod depth;
pub mod gui;
pub mod mesh;
pub mod shader;
pub mod texture;

use depth::DepthTexture;
use gui::GuiOverlay;

/// Device on wgpu's no-op backend: full validation, no GPU
#[cfg(test)]
pub(crate) fn noop_device() -> (Device, Queue) {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::NOOP,
        backend_options: wgpu::BackendOptions {
            noop: wgpu::NoopBackendOptions { enable: true },
            ..Default::default()
        },
        ..Default::default()
    });
    let adapter = futures::executor::block_on(
        instance.request_adapter(&wgpu::RequestAdapterOptions::default()),
    )
    .expect("noop adapter");
    futures::executor::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))
        .expect("noop device")
}

/// Prefers an sRGB format; empty capability lists are an error
fn choose_surface_modes(
    caps: &wgpu::SurfaceCapabilities,
) -> anyhow::Result<(wgpu::TextureFormat, wgpu::CompositeAlphaMode)> {
    let format = caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first())
        .copied()
        .context("surface reports no supported texture formats")?;
    let alpha_mode = caps
        .alpha_modes
        .first()
        .copied()
        .context("surface reports no supported alpha modes")?;
    Ok((format, alpha_mode))
}

/// Surface texture and encoder of the frame being recorded
pub struct Frame {
    output: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

/// Renderer handles wgpu setup, the scene pass and the GUI overlay
pub struct Renderer {
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    config: SurfaceConfiguration,
    adapter_info: wgpu::AdapterInfo,
    depth: DepthTexture,
    gui: GuiOverlay,
}

impl Renderer {
    /// Creates a new renderer for the given window
    pub async fn new(
        window: Arc<Window>,
        graphics: &GraphicsConfig,
        vsync: bool,
    ) -> anyhow::Result<Self> {
        info!(backend = ?graphics.backend, "Initializing wgpu renderer");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: graphics.backend.to_wgpu(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let adapter_info = adapter.get_info();
        info!(
            adapter.name = adapter_info.name,
            adapter.backend = ?adapter_info.backend,
            "Found GPU adapter"
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Main Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                experimental_features: Default::default(),
            })
            .await?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let (surface_format, alpha_mode) = choose_surface_modes(&surface_caps)?;

        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        info!(
            surface.width = config.width,
            surface.height = config.height,
            surface.format = ?config.format,
            surface.present_mode = ?config.present_mode,
            "Surface configured"
        );

        let depth = DepthTexture::new(&device, config.width, config.height);
        let gui = GuiOverlay::new(&window, &device, config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            adapter_info,
            depth,
            gui,
        })
    }

    pub fn config(&self) -> &SurfaceConfiguration {
        &self.config
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    /// Backend name as shown in the window title, e.g. `Vulkan` or `Gl`
    pub fn backend_name(&self) -> String {
        format!("{:?}", self.adapter_info.backend)
    }

    pub fn gui(&self) -> &GuiOverlay {
        &self.gui
    }

    /// Handles window events for egui
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.gui.handle_event(window, event)
    }

    /// Resizes the surface and the depth buffer; zero sizes are ignored
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth
                .resize(&self.device, new_size.width, new_size.height);

            info!(
                width = new_size.width,
                height = new_size.height,
                "Surface resized"
            );
        }
    }

    /// Reapplies the current surface configuration after the surface was lost
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquires the next surface texture
    pub fn begin_frame(&self) -> Result<Frame, wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        Ok(Frame {
            output,
            view,
            encoder,
        })
    }

    /// Clears color and depth, then records `draw` into the scene pass
    pub fn draw_scene(
        &self,
        frame: &mut Frame,
        clear_color: [f64; 4],
        draw: impl FnOnce(&mut wgpu::RenderPass<'_>),
    ) {
        let [r, g, b, a] = clear_color;
        let mut rpass = frame
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

        draw(&mut rpass);
    }

    /// Opens the GUI pass; widgets are declared on the returned context
    pub fn begin_gui_frame(&mut self, window: &Window) -> Context {
        self.gui.begin_frame(window)
    }

    /// Closes the GUI pass and draws it on top of the scene
    pub fn end_gui_frame(&mut self, window: &Window, frame: &mut Frame) {
        self.gui.end_frame(
            window,
            &self.device,
            &self.queue,
            &mut frame.encoder,
            &frame.view,
            [self.config.width, self.config.height],
        );
    }

    /// Submits the recorded commands and presents the frame
    pub fn present(&self, frame: Frame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.output.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capabilities(
        formats: Vec<wgpu::TextureFormat>,
        alpha_modes: Vec<wgpu::CompositeAlphaMode>,
    ) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            alpha_modes,
            ..Default::default()
        }
    }

    #[test]
    fn test_surface_prefers_srgb_format() {
        let caps = capabilities(
            vec![
                wgpu::TextureFormat::Bgra8Unorm,
                wgpu::TextureFormat::Bgra8UnormSrgb,
            ],
            vec![wgpu::CompositeAlphaMode::Opaque],
        );
        let (format, alpha) = choose_surface_modes(&caps).unwrap();
        assert_eq!(format, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(alpha, wgpu::CompositeAlphaMode::Opaque);
    }

    #[test]
    fn test_surface_falls_back_to_first_format() {
        let caps = capabilities(
            vec![wgpu::TextureFormat::Rgba16Float],
            vec![wgpu::CompositeAlphaMode::Auto],
        );
        let (format, _) = choose_surface_modes(&caps).unwrap();
        assert_eq!(format, wgpu::TextureFormat::Rgba16Float);
    }

    #[test]
    fn test_empty_capabilities_are_errors() {
        let err = choose_surface_modes(&capabilities(vec![], vec![wgpu::CompositeAlphaMode::Auto]))
            .unwrap_err();
        assert!(err.to_string().contains("texture formats"));

        let err = choose_surface_modes(&capabilities(vec![wgpu::TextureFormat::Bgra8UnormSrgb], vec![]))
            .unwrap_err();
        assert!(err.to_string().contains("alpha modes"));
    }
}
