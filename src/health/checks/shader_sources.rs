//! Shader source health check

use std::path::PathBuf;

use crate::app::config::{AppConfig, resolve_asset};
use crate::app::renderer::shader::{FRAGMENT_ENTRY_POINT, ShaderSource, VERTEX_ENTRY_POINT};
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that the configured cube shaders can be read and declare their entry points
pub struct ShaderSourcesCheck {
    vertex: PathBuf,
    fragment: PathBuf,
}

impl ShaderSourcesCheck {
    pub fn new() -> Self {
        let scene = AppConfig::builtin("release").scene;
        Self::with_paths(scene.vertex_shader, scene.fragment_shader)
    }

    pub fn with_paths(vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

impl Default for ShaderSourcesCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ShaderSourcesCheck {
    fn name(&self) -> &'static str {
        "Shader Sources"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates that the cube shader files are readable WGSL with entry points")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut problems = 0;

        let stages = [
            ("vertex", &self.vertex, VERTEX_ENTRY_POINT),
            ("fragment", &self.fragment, FRAGMENT_ENTRY_POINT),
        ];

        for (stage, path, entry_point) in stages {
            let source = ShaderSource::File(resolve_asset(path));
            match source.load() {
                Ok(code) if code.contains(&format!("fn {entry_point}")) => {
                    details.push(format!(
                        "  ✓ {} shader {}: {} bytes, entry point {}",
                        stage,
                        path.display(),
                        code.len(),
                        entry_point
                    ));
                }
                Ok(_) => {
                    details.push(format!(
                        "  ⚠ {} shader {}: no `{}` entry point",
                        stage,
                        path.display(),
                        entry_point
                    ));
                    problems += 1;
                }
                Err(e) => {
                    details.push(format!("  ⚠ {}", e));
                    problems += 1;
                }
            }
        }

        if problems > 0 {
            details.push("    The demo will bind the default shader instead".to_string());
            CheckResult::warn(format!("{} shader stage(s) unusable", problems))
                .with_details(details.join("\n"))
                .with_hint("Check scene.vertex_shader and scene.fragment_shader")
        } else {
            CheckResult::pass("Cube shaders readable").with_details(details.join("\n"))
        }
    }
}
