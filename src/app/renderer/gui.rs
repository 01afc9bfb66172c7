//! egui overlay drawn on top of the scene
//!
//! Every frame is bracketed by [`GuiOverlay::begin_frame`] and
//! [`GuiOverlay::end_frame`]; widgets are declared in between through the
//! returned context.

use egui::Context;
use tracing::debug;
use winit::event::WindowEvent;
use winit::window::Window;

pub struct GuiOverlay {
    ctx: Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    frame_open: bool,
}

/// Dark visuals; egui moves keyboard focus with Tab on its own
pub fn configure_context(ctx: &Context) {
    ctx.set_visuals(egui::Visuals::dark());
}

impl GuiOverlay {
    pub fn new(window: &Window, device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let ctx = Context::default();
        configure_context(&ctx);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(
            device,
            surface_format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                ..Default::default()
            },
        );

        debug!("GUI overlay initialized");

        Self {
            ctx,
            state,
            renderer,
            frame_open: false,
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Feeds a window event to egui; returns true when egui consumed it
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn wants_pointer_input(&self) -> bool {
        self.ctx.wants_pointer_input()
    }

    pub fn is_frame_open(&self) -> bool {
        self.frame_open
    }

    /// Collects input and opens a GUI pass
    pub fn begin_frame(&mut self, window: &Window) -> Context {
        debug_assert!(!self.frame_open, "begin_frame called twice without end_frame");
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);
        self.frame_open = true;
        self.ctx.clone()
    }

    /// Closes the GUI pass and records its draw into `view`, on top of what is there
    pub fn end_frame(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
    ) {
        debug_assert!(self.frame_open, "end_frame called without begin_frame");
        self.frame_open = false;

        let full_output = self.ctx.end_pass();
        self.state
            .handle_platform_output(window, full_output.platform_output);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: full_output.pixels_per_point,
        };

        let tris = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.renderer
            .update_buffers(device, queue, encoder, &tris, &screen_descriptor);

        {
            let rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.renderer
                .render(&mut rpass.forget_lifetime(), &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
