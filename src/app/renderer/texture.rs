//! 2D textures: CPU decoding and GPU upload

use std::path::PathBuf;

use thiserror::Error;

/// Storage format of the uploaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InternalFormat {
    #[default]
    RGBA8,
    RGBA32F,
}

impl InternalFormat {
    pub fn to_wgpu(self) -> wgpu::TextureFormat {
        match self {
            Self::RGBA8 => wgpu::TextureFormat::Rgba8UnormSrgb,
            Self::RGBA32F => wgpu::TextureFormat::Rgba32Float,
        }
    }

    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            Self::RGBA8 => 4,
            Self::RGBA32F => 16,
        }
    }

    /// Whether the format can be sampled with linear filtering without extra device features
    pub fn is_filterable(self) -> bool {
        matches!(self, Self::RGBA8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    Nearest,
    #[default]
    Linear,
}

impl From<Filter> for wgpu::FilterMode {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => wgpu::FilterMode::Nearest,
            Filter::Linear => wgpu::FilterMode::Linear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wrap {
    #[default]
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

impl From<Wrap> for wgpu::AddressMode {
    fn from(wrap: Wrap) -> Self {
        match wrap {
            Wrap::Repeat => wgpu::AddressMode::Repeat,
            Wrap::MirroredRepeat => wgpu::AddressMode::MirrorRepeat,
            Wrap::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        }
    }
}

/// Sampling options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureOptions {
    pub minification_filter: Filter,
    pub magnification_filter: Filter,
    pub wrap_x: Wrap,
    pub wrap_y: Wrap,
}

impl TextureOptions {
    /// Sampler options actually usable with `format`
    pub fn effective(self, format: InternalFormat) -> Self {
        if format.is_filterable() {
            self
        } else {
            Self {
                minification_filter: Filter::Nearest,
                magnification_filter: Filter::Nearest,
                ..self
            }
        }
    }
}

/// Where texture pixels come from
#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    File {
        path: PathBuf,
        flip_y: bool,
        texture_format: InternalFormat,
    },
    /// Procedural black and magenta checkerboard
    Checkerboard { size: u32, cells: u32 },
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load texture {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("texture {path} has no pixels")]
    Empty { path: PathBuf },
}

/// Decoded pixels ready for upload
#[derive(Debug, Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub format: InternalFormat,
    pub bytes: Vec<u8>,
}

impl TextureData {
    pub fn load(source: &TextureSource) -> Result<Self, TextureError> {
        match source {
            TextureSource::File {
                path,
                flip_y,
                texture_format,
            } => Self::from_file(path.clone(), *flip_y, *texture_format),
            TextureSource::Checkerboard { size, cells } => Ok(Self::checkerboard(*size, *cells)),
        }
    }

    fn from_file(path: PathBuf, flip_y: bool, format: InternalFormat) -> Result<Self, TextureError> {
        let image = match image::open(&path) {
            Ok(image) => image,
            Err(source) => return Err(TextureError::Load { path, source }),
        };
        let image = if flip_y { image.flipv() } else { image };

        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { path });
        }

        let bytes = match format {
            InternalFormat::RGBA8 => image.to_rgba8().into_raw(),
            InternalFormat::RGBA32F => {
                bytemuck::cast_slice(image.to_rgba32f().as_raw()).to_vec()
            }
        };

        Ok(Self {
            width,
            height,
            format,
            bytes,
        })
    }

    /// Square RGBA8 checkerboard, `cells` squares per side
    pub fn checkerboard(size: u32, cells: u32) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let mut bytes = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let pixel: [u8; 4] = if (x / cell + y / cell) % 2 == 0 {
                    [0, 0, 0, 255]
                } else {
                    [255, 0, 255, 255]
                };
                bytes.extend_from_slice(&pixel);
            }
        }
        Self {
            width: size,
            height: size,
            format: InternalFormat::RGBA8,
            bytes,
        }
    }

    /// RGBA of the pixel at (x, y) for RGBA8 data
    pub fn pixel_rgba8(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if self.format != InternalFormat::RGBA8 || x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        self.bytes
            .get(offset..offset + 4)
            .and_then(|p| p.try_into().ok())
    }
}

/// Texture, view and sampler on the GPU
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub format: InternalFormat,
}

impl Texture {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &TextureData,
        options: TextureOptions,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: data.format.to_wgpu(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.bytes,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(data.format.bytes_per_pixel() * data.width),
                rows_per_image: Some(data.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let options = options.effective(data.format);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: options.wrap_x.into(),
            address_mode_v: options.wrap_y.into(),
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: options.magnification_filter.into(),
            min_filter: options.minification_filter.into(),
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            format: data.format,
        }
    }

    /// Layout for a texture at binding 0 and its sampler at binding 1
    pub fn bind_group_layout(device: &wgpu::Device, format: InternalFormat) -> wgpu::BindGroupLayout {
        let filterable = format.is_filterable();
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(if filterable {
                        wgpu::SamplerBindingType::Filtering
                    } else {
                        wgpu::SamplerBindingType::NonFiltering
                    }),
                    count: None,
                },
            ],
        })
    }

    pub fn bind_group(&self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &std::path::Path) -> PathBuf {
        // 1x2 image: red on top, blue below
        let mut image = image::RgbaImage::new(1, 2);
        image.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        image.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
        let path = dir.join("tiny.png");
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_png_keeps_row_order() {
        let dir = tempfile::tempdir().unwrap();
        let data = TextureData::load(&TextureSource::File {
            path: write_png(dir.path()),
            flip_y: false,
            texture_format: InternalFormat::RGBA8,
        })
        .unwrap();

        assert_eq!((data.width, data.height), (1, 2));
        assert_eq!(data.pixel_rgba8(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(data.pixel_rgba8(0, 1), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_flip_y_swaps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let data = TextureData::load(&TextureSource::File {
            path: write_png(dir.path()),
            flip_y: true,
            texture_format: InternalFormat::RGBA8,
        })
        .unwrap();

        assert_eq!(data.pixel_rgba8(0, 0), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_float_format_uses_four_floats_per_pixel() {
        let dir = tempfile::tempdir().unwrap();
        let data = TextureData::load(&TextureSource::File {
            path: write_png(dir.path()),
            flip_y: false,
            texture_format: InternalFormat::RGBA32F,
        })
        .unwrap();

        assert_eq!(data.bytes.len(), 2 * 16);
        let floats: &[f32] = bytemuck::cast_slice(&data.bytes);
        assert_eq!(&floats[..4], &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(data.pixel_rgba8(0, 0), None);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = TextureData::load(&TextureSource::File {
            path: PathBuf::from("does/not/exist.png"),
            flip_y: true,
            texture_format: InternalFormat::RGBA8,
        })
        .unwrap_err();

        assert!(err.to_string().contains("does/not/exist.png"));
    }

    #[test]
    fn test_checkerboard_alternates_cells() {
        let data = TextureData::checkerboard(8, 4);
        assert_eq!(data.bytes.len(), 8 * 8 * 4);
        assert_eq!(data.pixel_rgba8(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(data.pixel_rgba8(2, 0), Some([255, 0, 255, 255]));
        assert_eq!(data.pixel_rgba8(2, 2), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_float_textures_force_nearest_sampling() {
        let options = TextureOptions::default();
        assert_eq!(options.effective(InternalFormat::RGBA8), options);

        let forced = options.effective(InternalFormat::RGBA32F);
        assert_eq!(forced.minification_filter, Filter::Nearest);
        assert_eq!(forced.magnification_filter, Filter::Nearest);
        assert_eq!(forced.wrap_x, Wrap::Repeat);
    }
}
