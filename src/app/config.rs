//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title used until the first frame refreshes it
    pub title: String,
    /// Window width in screen coordinates
    pub width: f64,
    /// Window height in screen coordinates
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be maximized right after creation
    pub maximized: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
    /// Whether to enable vsync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Look at my BEAUTIFUL RENDER ENGINE".to_string(),
            width: 1280.0,
            height: 720.0,
            fullscreen: false,
            maximized: true,
            resizable: true,
            decorated: true,
            vsync: true,
        }
    }
}

/// Graphics API selection
///
/// `Gl` runs the demo on an OpenGL context through wgpu's GL backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphicsBackend {
    #[default]
    Auto,
    Gl,
    Vulkan,
    Metal,
    Dx12,
}

impl GraphicsBackend {
    /// Backends wgpu is allowed to pick an adapter from
    pub fn to_wgpu(self) -> wgpu::Backends {
        match self {
            Self::Auto => wgpu::Backends::all(),
            Self::Gl => wgpu::Backends::GL,
            Self::Vulkan => wgpu::Backends::VULKAN,
            Self::Metal => wgpu::Backends::METAL,
            Self::Dx12 => wgpu::Backends::DX12,
        }
    }
}

/// Graphics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    pub backend: GraphicsBackend,
    /// Clear color (RGBA) applied before the scene is drawn
    pub clear_color: [f64; 4],
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            backend: GraphicsBackend::Auto,
            clear_color: [1.0, 0.0, 0.0, 0.0],
        }
    }
}

/// Scene assets and projection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub texture_path: PathBuf,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub field_of_view_degrees: f32,
    pub near_plane: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            texture_path: PathBuf::from("res/texture.png"),
            vertex_shader: PathBuf::from("res/vertex.wgsl"),
            fragment_shader: PathBuf::from("res/fragment.wgsl"),
            field_of_view_degrees: 45.0,
            near_plane: 0.001,
        }
    }
}

/// GUI overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Prefix of the per-frame window title
    pub title_prefix: String,
    pub show_demo_window: bool,
    pub show_another_window: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title_prefix: "MY SUPER RENDERING TP".to_string(),
            show_demo_window: false,
            show_another_window: false,
        }
    }
}

/// Input forwarding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Forward pointer events to the registered callbacks even when the GUI consumed them
    pub forward_gui_captured_events: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            forward_gui_captured_events: true,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub graphics: GraphicsConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub gui: GuiConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl AppConfig {
    /// Built-in configuration for a profile, used when no file can be loaded
    pub fn builtin(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            window: WindowConfig::default(),
            graphics: GraphicsConfig::default(),
            scene: SceneConfig::default(),
            gui: GuiConfig::default(),
            input: InputConfig::default(),
        }
    }

    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_WINDOW__WIDTH=1920)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config_dir = Self::find_config_dir();
        Self::load_from(config_dir.as_deref(), profile)
    }

    /// Loads a profile from an explicit config directory
    pub fn load_from(config_dir: Option<&Path>, profile: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(config_dir, profile, Self::env_source())
    }

    /// `APP_` prefix, `__` between nested keys: `APP_WINDOW__WIDTH=1920`
    fn env_source() -> Environment {
        Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(
        config_dir: Option<&Path>,
        profile: &str,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(dir) = config_dir {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", profile)).required(false));
        }

        builder = builder.add_source(env);

        let config = builder.set_override("profile", profile)?.build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self::builtin("release"))
    }
}

/// Resolves an asset path: absolute paths and paths that exist relative to the
/// working directory are used as-is, anything else is looked up in the crate root.
pub fn resolve_asset(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    let in_crate = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
    if in_crate.exists() {
        in_crate
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_builtin_matches_demo_defaults() {
        let config = AppConfig::builtin("debug");
        assert_eq!(config.profile, "debug");
        assert_eq!(config.window.width, 1280.0);
        assert_eq!(config.window.height, 720.0);
        assert!(config.window.maximized);
        assert_eq!(config.graphics.clear_color, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(config.scene.field_of_view_degrees, 45.0);
        assert!(config.input.forward_gui_captured_events);
    }

    #[test]
    fn test_load_partial_profile_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("custom.toml"),
            "[window]\ntitle = \"Custom\"\nwidth = 640.0\n\n[graphics]\nbackend = \"gl\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(Some(dir.path()), "custom").unwrap();
        assert_eq!(config.profile, "custom");
        assert_eq!(config.window.title, "Custom");
        assert_eq!(config.window.width, 640.0);
        assert_eq!(config.window.height, 720.0);
        assert_eq!(config.graphics.backend, GraphicsBackend::Gl);
        assert_eq!(config.scene.texture_path, PathBuf::from("res/texture.png"));
    }

    #[test]
    fn test_env_overrides_use_single_underscore_after_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let vars = ::config::Map::from([
            ("APP_WINDOW__WIDTH".to_string(), "1920".to_string()),
            ("APP_GRAPHICS__BACKEND".to_string(), "gl".to_string()),
            ("APP__WINDOW__HEIGHT".to_string(), "333".to_string()),
        ]);

        let env = AppConfig::env_source().source(Some(vars));
        let config = AppConfig::load_with_env(Some(dir.path()), "env", env).unwrap();

        assert_eq!(config.window.width, 1920.0);
        assert_eq!(config.graphics.backend, GraphicsBackend::Gl);
        // A doubled prefix separator is not part of the documented form
        assert_eq!(config.window.height, 720.0);
    }

    #[test]
    fn test_missing_profile_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(Some(dir.path()), "nothing-here").unwrap();
        assert_eq!(config.window.width, 1280.0);
    }

    #[test]
    fn test_backend_mapping() {
        assert_eq!(GraphicsBackend::Gl.to_wgpu(), wgpu::Backends::GL);
        assert_eq!(GraphicsBackend::Auto.to_wgpu(), wgpu::Backends::all());
    }

    #[test]
    fn test_resolve_asset_falls_back_to_crate_root() {
        let resolved = resolve_asset(Path::new("res/vertex.wgsl"));
        assert!(resolved.exists(), "expected {} to exist", resolved.display());
    }
}
