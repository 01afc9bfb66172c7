//! Textured cube pipeline with a default-shader fallback

use bytemuck::Zeroable;
use tracing::{info, warn};
use wgpu::util::DeviceExt;

use super::depth::DepthTexture;
use super::mesh::Mesh;
use super::shader::{
    FRAGMENT_ENTRY_POINT, ShaderDesc, ShaderError, ShaderModules, VERTEX_ENTRY_POINT,
    capture_validation,
};
use super::texture::Texture;

/// Uniform block shared by the cube shaders
///
/// Layout matches `struct Uniforms` in `res/vertex.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeUniforms {
    pub model_view_projection: [[f32; 4]; 4],
    pub model_matrix: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub light_direction: [f32; 4],
    pub random_seeds: [f32; 4],
    /// x: frames since the view last changed
    pub frame_info: [u32; 4],
}

/// Which program the cube is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeProgram {
    Textured,
    Default,
}

/// Draws a mesh with the cube uniforms and texture
pub struct CubeRenderer {
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    textured_pipeline: Option<wgpu::RenderPipeline>,
    default_pipeline: wgpu::RenderPipeline,
    program: CubeProgram,
}

impl CubeRenderer {
    /// Builds both pipelines; a failing textured program leaves the default one bound
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        mesh: &Mesh,
        texture: &Texture,
        shader: &ShaderDesc,
    ) -> Result<Self, ShaderError> {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Uniform Buffer"),
            contents: bytemuck::bytes_of(&CubeUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Cube Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cube Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = Texture::bind_group_layout(device, texture.format);
        let texture_bind_group = texture.bind_group(device, &texture_layout);

        let default_pipeline = build_pipeline(
            device,
            surface_format,
            mesh,
            &ShaderDesc::default_shader(),
            &[&uniform_layout],
            "Default Cube Pipeline",
        )?;

        let textured_pipeline = match build_pipeline(
            device,
            surface_format,
            mesh,
            shader,
            &[&uniform_layout, &texture_layout],
            "Textured Cube Pipeline",
        ) {
            Ok(pipeline) => Some(pipeline),
            Err(error) => {
                warn!(error = %error, "Cube shader unavailable, binding the default shader");
                None
            }
        };

        let program = if textured_pipeline.is_some() {
            CubeProgram::Textured
        } else {
            CubeProgram::Default
        };
        info!(program = ?program, "Cube renderer initialized");

        Ok(Self {
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group,
            textured_pipeline,
            default_pipeline,
            program,
        })
    }

    pub fn program(&self) -> CubeProgram {
        self.program
    }

    /// Switches to the fallback program
    pub fn bind_default_shader(&mut self) {
        self.program = CubeProgram::Default;
    }

    /// Switches back to the textured program when it compiled
    pub fn bind_textured_shader(&mut self) -> bool {
        if self.textured_pipeline.is_some() {
            self.program = CubeProgram::Textured;
            true
        } else {
            false
        }
    }

    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &CubeUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, mesh: &Mesh) {
        match (&self.textured_pipeline, self.program) {
            (Some(pipeline), CubeProgram::Textured) => {
                rpass.set_pipeline(pipeline);
                rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
                rpass.set_bind_group(1, &self.texture_bind_group, &[]);
            }
            _ => {
                rpass.set_pipeline(&self.default_pipeline);
                rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
            }
        }
        mesh.draw(rpass);
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    mesh: &Mesh,
    shader: &ShaderDesc,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    label: &str,
) -> Result<wgpu::RenderPipeline, ShaderError> {
    let modules = ShaderModules::compile(device, shader, label)?;

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    let buffers = mesh.vertex_buffer_layouts();
    capture_validation(device, || {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &modules.vertex,
                entry_point: Some(VERTEX_ENTRY_POINT),
                buffers: &buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &modules.fragment,
                entry_point: Some(FRAGMENT_ENTRY_POINT),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthTexture::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    })
    .map_err(|message| ShaderError::Pipeline {
        label: label.to_string(),
        message,
    })
}
