//! Main application handler: window context, renderer and the cube scene

use anyhow::Context as _;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

#[cfg(debug_assertions)]
use winit::keyboard::{KeyCode, PhysicalKey};

use super::config::{AppConfig, SceneConfig, resolve_asset};
use super::context::WindowContext;
use super::debug_ui::{DebugUIState, RendererSummary};
use super::frame_stats::FrameStats;
use super::renderer::Renderer;
use super::renderer::cube::CubeRenderer;
use super::renderer::mesh::Mesh;
use super::renderer::shader::ShaderDesc;
use super::renderer::texture::{
    Filter, InternalFormat, Texture, TextureData, TextureOptions, TextureSource, Wrap,
};
use super::window::frame_title;
use crate::scene::{Scene, cube_mesh_desc};

/// GPU resources of the cube
struct CubeResources {
    mesh: Mesh,
    renderer: CubeRenderer,
}

impl CubeResources {
    fn load(renderer: &Renderer, config: &SceneConfig) -> anyhow::Result<Self> {
        let device = renderer.device();
        let mesh = Mesh::new(device, &cube_mesh_desc(), "Cube").context("invalid cube mesh")?;

        let source = TextureSource::File {
            path: resolve_asset(&config.texture_path),
            flip_y: true,
            texture_format: InternalFormat::RGBA8,
        };
        let data = TextureData::load(&source).unwrap_or_else(|e| {
            warn!(error = %e, "Texture unavailable, using a checkerboard");
            TextureData::checkerboard(256, 8)
        });
        let texture = Texture::new(
            device,
            renderer.queue(),
            &data,
            TextureOptions {
                minification_filter: Filter::Linear,
                magnification_filter: Filter::Linear,
                wrap_x: Wrap::Repeat,
                wrap_y: Wrap::Repeat,
            },
            "Cube Texture",
        );

        let shader = ShaderDesc::from_files(
            resolve_asset(&config.vertex_shader),
            resolve_asset(&config.fragment_shader),
        );
        let cube_renderer =
            CubeRenderer::new(device, renderer.config().format, &mesh, &texture, &shader)
                .context("failed to build the default cube pipeline")?;

        Ok(Self {
            mesh,
            renderer: cube_renderer,
        })
    }
}

/// Main application
pub struct App {
    config: AppConfig,
    context: Option<WindowContext>,
    renderer: Option<Renderer>,
    cube: Option<CubeResources>,
    scene: Scene,
    frame_stats: FrameStats,
    debug_ui: DebugUIState,
    init_error: Option<anyhow::Error>,
}

impl App {
    /// Creates a new application with the provided configuration
    pub fn new(config: AppConfig) -> Self {
        info!(profile = %config.profile, "Starting cube demo");
        info!(?config.window, "Window configuration");

        let scene = Scene::new(&config.scene, &config.gui);

        Self {
            config,
            context: None,
            renderer: None,
            cube: None,
            scene,
            frame_stats: FrameStats::new(),
            debug_ui: DebugUIState::default(),
            init_error: None,
        }
    }

    /// Creates a new application with configuration loaded from environment
    pub fn from_env() -> Self {
        let config = AppConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            AppConfig::builtin("release")
        });
        Self::new(config)
    }

    /// Error that stopped initialization, if any
    pub fn take_init_error(&mut self) -> Option<anyhow::Error> {
        self.init_error.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let mut context = WindowContext::create(event_loop, &self.config.window, &self.config.input)
            .context("failed to create window")?;

        // winit's event loop is synchronous, so the async setup runs on a local runtime
        let renderer = tokio::runtime::Runtime::new()
            .context("failed to create tokio runtime")?
            .block_on(Renderer::new(
                context.window().clone(),
                &self.config.graphics,
                self.config.window.vsync,
            ))
            .context("failed to initialize renderer")?;
        info!(backend = %renderer.backend_name(), "Renderer initialized successfully");

        let cube = CubeResources::load(&renderer, &self.config.scene)?;

        context.set_events_callbacks(self.scene.events_callbacks());

        self.context = Some(context);
        self.renderer = Some(renderer);
        self.cube = Some(cube);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(context), Some(renderer), Some(cube)) =
            (&mut self.context, &mut self.renderer, &mut self.cube)
        else {
            return;
        };

        if !context.window_is_open() {
            event_loop.exit();
            return;
        }

        self.frame_stats.push(context.delta_time_in_seconds());
        context.set_title(&frame_title(
            &self.config.gui.title_prefix,
            self.frame_stats.fps(),
            &renderer.backend_name(),
        ));

        self.scene.update();
        let uniforms = self.scene.uniforms(
            context.time_in_seconds(),
            context.framebuffer_aspect_ratio(),
        );
        cube.renderer.update_uniforms(renderer.queue(), &uniforms);

        let mut frame = match renderer.begin_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                renderer.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => {
                error!(error = %e, "Render error");
                return;
            }
        };

        renderer.draw_scene(&mut frame, self.config.graphics.clear_color, |rpass| {
            cube.renderer.draw(rpass, &cube.mesh);
        });

        let window = context.window().clone();
        let ctx = renderer.begin_gui_frame(&window);
        self.scene.widgets.show(&ctx, &self.frame_stats);
        let summary = RendererSummary {
            backend: renderer.backend_name(),
            adapter: renderer.adapter_info().name.clone(),
            surface_width: renderer.config().width,
            surface_height: renderer.config().height,
            surface_format: format!("{:?}", renderer.config().format),
            program: format!("{:?}", cube.renderer.program()),
        };
        self.debug_ui.render(
            &ctx,
            &self.frame_stats,
            context.time_in_seconds(),
            &self.scene.camera().borrow(),
            &summary,
        );
        renderer.end_gui_frame(&window, &mut frame);

        renderer.present(frame);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.context.is_some() || self.init_error.is_some() {
            return;
        }

        if let Err(e) = self.initialize(event_loop) {
            error!(error = %format!("{e:#}"), "Initialization failed");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(context) = &self.context {
            context.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(context) = &mut self.context else {
            return;
        };

        // Let egui see the event first so its verdict can gate the callbacks
        let gui_consumed = match &mut self.renderer {
            Some(renderer) => renderer.handle_event(context.window(), &event),
            None => false,
        };

        #[cfg(debug_assertions)]
        if let WindowEvent::KeyboardInput { event, .. } = &event
            && event.state.is_pressed()
            && let PhysicalKey::Code(KeyCode::Backquote) = event.physical_key
        {
            self.debug_ui.toggle_window();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                context.request_close();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(*new_size);
                }
            }
            _ => {}
        }

        context.handle_window_event(&event, gui_consumed);

        if let WindowEvent::RedrawRequested = event {
            self.redraw(event_loop);
        }
    }
}
