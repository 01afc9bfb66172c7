//! Indexed meshes described by interleaved float vertex buffers

use thiserror::Error;
use wgpu::util::DeviceExt;

/// One vertex attribute and the shader location it feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexAttribute {
    Position3D(u32),
    UV(u32),
    Normal3D(u32),
}

impl VertexAttribute {
    pub fn location(self) -> u32 {
        match self {
            Self::Position3D(location) | Self::UV(location) | Self::Normal3D(location) => location,
        }
    }

    /// Number of floats this attribute occupies
    pub fn components(self) -> usize {
        match self {
            Self::Position3D(_) | Self::Normal3D(_) => 3,
            Self::UV(_) => 2,
        }
    }

    fn format(self) -> wgpu::VertexFormat {
        match self {
            Self::Position3D(_) | Self::Normal3D(_) => wgpu::VertexFormat::Float32x3,
            Self::UV(_) => wgpu::VertexFormat::Float32x2,
        }
    }
}

/// Interleaved vertex data and its layout
#[derive(Debug, Clone, Default)]
pub struct VertexBufferDesc {
    pub layout: Vec<VertexAttribute>,
    pub data: Vec<f32>,
}

impl VertexBufferDesc {
    pub fn stride_in_floats(&self) -> usize {
        self.layout.iter().map(|a| a.components()).sum()
    }

    /// wgpu attribute descriptors and the stride in bytes
    pub fn wgpu_attributes(&self) -> (wgpu::BufferAddress, Vec<wgpu::VertexAttribute>) {
        let float_size = std::mem::size_of::<f32>() as wgpu::BufferAddress;
        let mut offset = 0;
        let attributes = self
            .layout
            .iter()
            .map(|attribute| {
                let desc = wgpu::VertexAttribute {
                    format: attribute.format(),
                    offset,
                    shader_location: attribute.location(),
                };
                offset += attribute.components() as wgpu::BufferAddress * float_size;
                desc
            })
            .collect();
        (offset, attributes)
    }
}

/// CPU-side description of a mesh
#[derive(Debug, Clone, Default)]
pub struct MeshDesc {
    pub vertex_buffers: Vec<VertexBufferDesc>,
    /// Triangle list indices; empty means a non-indexed draw
    pub index_buffer: Vec<u32>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("mesh has no vertex buffers")]
    NoVertexBuffers,
    #[error("vertex buffer {buffer} has an empty layout")]
    EmptyLayout { buffer: usize },
    #[error("vertex buffer {buffer} holds {len} floats, not a multiple of its stride {stride}")]
    MisalignedData {
        buffer: usize,
        len: usize,
        stride: usize,
    },
    #[error("vertex buffer {buffer} holds {found} vertices, expected {expected}")]
    VertexCountMismatch {
        buffer: usize,
        expected: usize,
        found: usize,
    },
    #[error("shader location {0} is used by more than one attribute")]
    DuplicateLocation(u32),
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl MeshDesc {
    /// Checks the layout and indices, returning the vertex count
    pub fn validate(&self) -> Result<usize, MeshError> {
        if self.vertex_buffers.is_empty() {
            return Err(MeshError::NoVertexBuffers);
        }

        let mut locations = Vec::new();
        let mut vertex_count = None;
        for (buffer, desc) in self.vertex_buffers.iter().enumerate() {
            let stride = desc.stride_in_floats();
            if stride == 0 {
                return Err(MeshError::EmptyLayout { buffer });
            }
            if desc.data.len() % stride != 0 {
                return Err(MeshError::MisalignedData {
                    buffer,
                    len: desc.data.len(),
                    stride,
                });
            }

            let count = desc.data.len() / stride;
            match vertex_count {
                None => vertex_count = Some(count),
                Some(expected) if expected != count => {
                    return Err(MeshError::VertexCountMismatch {
                        buffer,
                        expected,
                        found: count,
                    });
                }
                Some(_) => {}
            }

            for attribute in &desc.layout {
                let location = attribute.location();
                if locations.contains(&location) {
                    return Err(MeshError::DuplicateLocation(location));
                }
                locations.push(location);
            }
        }

        let vertex_count = vertex_count.unwrap_or(0);
        if let Some((position, &index)) = self
            .index_buffer
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            });
        }

        Ok(vertex_count)
    }
}

struct GpuVertexBuffer {
    buffer: wgpu::Buffer,
    stride: wgpu::BufferAddress,
    attributes: Vec<wgpu::VertexAttribute>,
}

/// Mesh uploaded to the GPU
pub struct Mesh {
    vertex_buffers: Vec<GpuVertexBuffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
    vertex_count: u32,
}

impl Mesh {
    /// Validates the description and uploads its buffers
    pub fn new(device: &wgpu::Device, desc: &MeshDesc, label: &str) -> Result<Self, MeshError> {
        let vertex_count = desc.validate()?;

        let vertex_buffers = desc
            .vertex_buffers
            .iter()
            .enumerate()
            .map(|(i, vb)| {
                let (stride, attributes) = vb.wgpu_attributes();
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{label} Vertex Buffer {i}")),
                    contents: bytemuck::cast_slice(&vb.data),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                GpuVertexBuffer {
                    buffer,
                    stride,
                    attributes,
                }
            })
            .collect();

        let index_buffer = (!desc.index_buffer.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(&desc.index_buffer),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        Ok(Self {
            vertex_buffers,
            index_buffer,
            index_count: desc.index_buffer.len() as u32,
            vertex_count: vertex_count as u32,
        })
    }

    /// Buffer layouts for building a pipeline that draws this mesh
    pub fn vertex_buffer_layouts(&self) -> Vec<wgpu::VertexBufferLayout<'_>> {
        self.vertex_buffers
            .iter()
            .map(|vb| wgpu::VertexBufferLayout {
                array_stride: vb.stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &vb.attributes,
            })
            .collect()
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Records the draw call; the pipeline and bind groups must already be set
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        for (slot, vb) in self.vertex_buffers.iter().enumerate() {
            rpass.set_vertex_buffer(slot as u32, vb.buffer.slice(..));
        }
        match &self.index_buffer {
            Some(index_buffer) => {
                rpass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..self.index_count, 0, 0..1);
            }
            None => rpass.draw(0..self.vertex_count, 0..1),
        }
    }
}
