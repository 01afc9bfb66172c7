//! Cube scene health check

use crate::app::config::{AppConfig, resolve_asset};
use crate::app::renderer::texture::{InternalFormat, TextureData, TextureSource};
use crate::health::check::{CheckResult, SystemCheck};
use crate::scene::{RandomSeeds, Scene, cube_mesh_desc};

/// Checks the cube mesh, per-frame transforms and texture asset
pub struct SceneCheck {
    config: AppConfig,
}

impl SceneCheck {
    pub fn new() -> Self {
        Self::with_config(AppConfig::builtin("release"))
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self { config }
    }
}

impl Default for SceneCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SceneCheck {
    fn name(&self) -> &'static str {
        "Scene"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates cube geometry, frame uniforms and the cube texture")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        let mesh = cube_mesh_desc();
        match mesh.validate() {
            Ok(vertices) => details.push(format!(
                "  ✓ Cube mesh: {} vertices, {} indices",
                vertices,
                mesh.index_buffer.len()
            )),
            Err(e) => {
                details.push(format!("  ✗ Cube mesh invalid: {}", e));
                return CheckResult::fail("Cube mesh invalid").with_details(details.join("\n"));
            }
        }

        let mut scene = Scene::with_seeds(
            &self.config.scene,
            &self.config.gui,
            RandomSeeds::with_seed(0),
        );
        scene.update();
        let uniforms = scene.uniforms(1.0, 16.0 / 9.0);
        let all_finite = uniforms
            .model_view_projection
            .iter()
            .chain(&uniforms.model_matrix)
            .chain(&uniforms.normal_matrix)
            .flatten()
            .all(|v| v.is_finite());
        if !all_finite {
            details.push("  ✗ Frame uniforms contain non-finite values".to_string());
            return CheckResult::fail("Frame transforms broken").with_details(details.join("\n"));
        }
        details.push(format!(
            "  ✓ Frame uniforms finite (fov {}°, near {})",
            self.config.scene.field_of_view_degrees, self.config.scene.near_plane
        ));

        let texture_path = resolve_asset(&self.config.scene.texture_path);
        let texture = TextureData::load(&TextureSource::File {
            path: texture_path.clone(),
            flip_y: true,
            texture_format: InternalFormat::RGBA8,
        });
        match texture {
            Ok(data) => details.push(format!(
                "  ✓ Texture {}: {}x{}",
                texture_path.display(),
                data.width,
                data.height
            )),
            Err(e) => {
                details.push(format!("  ⚠ {}", e));
                details.push("    The demo will draw a checkerboard instead".to_string());
                return CheckResult::warn("Cube texture unavailable")
                    .with_details(details.join("\n"))
                    .with_hint("Set scene.texture_path to a readable image");
            }
        }

        CheckResult::pass("Scene ready").with_details(details.join("\n"))
    }
}
