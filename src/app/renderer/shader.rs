//! Shader sources and compilation with captured validation errors

use std::borrow::Cow;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

/// Trivial fallback program: transformed position only, opaque white
pub const DEFAULT_SHADER: &str = r#"
struct Uniforms {
    model_view_projection: mat4x4<f32>,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return uniforms.model_view_projection * vec4<f32>(position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;

pub const VERTEX_ENTRY_POINT: &str = "vs_main";
pub const FRAGMENT_ENTRY_POINT: &str = "fs_main";

#[derive(Debug, Clone, PartialEq)]
pub enum ShaderSource {
    Code(String),
    File(PathBuf),
}

impl ShaderSource {
    /// WGSL text of the source, reading the file if needed
    pub fn load(&self) -> Result<Cow<'_, str>, ShaderError> {
        match self {
            Self::Code(code) => Ok(Cow::Borrowed(code)),
            Self::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| ShaderError::Read {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

/// Vertex and fragment stages of one program
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderDesc {
    pub vertex: ShaderSource,
    pub fragment: ShaderSource,
}

impl ShaderDesc {
    pub fn from_files(vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        Self {
            vertex: ShaderSource::File(vertex.into()),
            fragment: ShaderSource::File(fragment.into()),
        }
    }

    /// Both stages of the fallback program
    pub fn default_shader() -> Self {
        Self {
            vertex: ShaderSource::Code(DEFAULT_SHADER.to_string()),
            fragment: ShaderSource::Code(DEFAULT_SHADER.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} shader failed to compile: {message}")]
    Compile { stage: &'static str, message: String },
    #[error("render pipeline `{label}` is invalid: {message}")]
    Pipeline { label: String, message: String },
}

/// Runs `f` inside a validation error scope and reports the captured error, if any
pub fn capture_validation<T>(device: &wgpu::Device, f: impl FnOnce() -> T) -> Result<T, String> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();
    match futures::executor::block_on(device.pop_error_scope()) {
        None => Ok(value),
        Some(error) => Err(error.to_string()),
    }
}

/// Compiled modules for a program's two stages
pub struct ShaderModules {
    pub vertex: wgpu::ShaderModule,
    pub fragment: wgpu::ShaderModule,
}

impl ShaderModules {
    pub fn compile(device: &wgpu::Device, desc: &ShaderDesc, label: &str) -> Result<Self, ShaderError> {
        let vertex = compile_stage(device, &desc.vertex, &format!("{label} Vertex"), "vertex")?;
        let fragment =
            compile_stage(device, &desc.fragment, &format!("{label} Fragment"), "fragment")?;
        Ok(Self { vertex, fragment })
    }
}

fn compile_stage(
    device: &wgpu::Device,
    source: &ShaderSource,
    label: &str,
    stage: &'static str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let code = source.load()?;
    debug!(shader.label = label, shader.bytes = code.len(), "Compiling shader");
    capture_validation(device, || {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(code),
        })
    })
    .map_err(|message| ShaderError::Compile { stage, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_source_is_borrowed() {
        let source = ShaderSource::Code("fn main() {}".into());
        assert!(matches!(source.load().unwrap(), Cow::Borrowed("fn main() {}")));
    }

    #[test]
    fn test_file_source_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shader.wgsl");
        std::fs::write(&path, DEFAULT_SHADER).unwrap();

        let source = ShaderSource::File(path);
        assert_eq!(source.load().unwrap(), DEFAULT_SHADER);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let source = ShaderSource::File(PathBuf::from("missing/vertex.wgsl"));
        let err = source.load().unwrap_err();
        assert!(matches!(err, ShaderError::Read { .. }));
        assert!(err.to_string().contains("missing/vertex.wgsl"));
    }

    #[test]
    fn test_broken_wgsl_is_returned_as_compile_error() {
        let (device, _queue) = crate::app::renderer::noop_device();
        let desc = ShaderDesc {
            vertex: ShaderSource::Code("@vertex fn vs_main( -> {".into()),
            fragment: ShaderSource::Code(DEFAULT_SHADER.into()),
        };

        let err = ShaderModules::compile(&device, &desc, "Broken").err();
        assert!(
            matches!(err, Some(ShaderError::Compile { stage: "vertex", .. })),
            "{err:?}"
        );
    }

    #[test]
    fn test_default_shader_compiles() {
        let (device, _queue) = crate::app::renderer::noop_device();
        assert!(ShaderModules::compile(&device, &ShaderDesc::default_shader(), "Default").is_ok());
    }

    #[test]
    fn test_default_shader_declares_both_entry_points() {
        let desc = ShaderDesc::default_shader();
        let code = desc.vertex.load().unwrap();
        assert!(code.contains(&format!("fn {VERTEX_ENTRY_POINT}")));
        assert!(code.contains(&format!("fn {FRAGMENT_ENTRY_POINT}")));
    }
}
