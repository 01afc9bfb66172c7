//! Configuration system health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that configuration can be loaded for all profiles
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Creates a new config check with default profiles
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    /// Creates a config check with custom profiles
    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// Values that load fine but cannot render a sensible frame
fn suspicious_values(config: &AppConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.window.width <= 0.0 || config.window.height <= 0.0 {
        warnings.push(format!(
            "window size {}x{} is not positive",
            config.window.width, config.window.height
        ));
    }
    let fov = config.scene.field_of_view_degrees;
    if !(fov > 0.0 && fov < 180.0) {
        warnings.push(format!("field of view {}° outside (0, 180)", fov));
    }
    if config.scene.near_plane <= 0.0 {
        warnings.push(format!("near plane {} is not positive", config.scene.near_plane));
    }
    if config
        .graphics
        .clear_color
        .iter()
        .any(|c| !(0.0..=1.0).contains(c))
    {
        warnings.push(format!(
            "clear color {:?} outside [0, 1]",
            config.graphics.clear_color
        ));
    }
    warnings
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates configuration loading from files and environment")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut all_success = true;
        let mut has_warnings = false;

        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => {
                    details.push(format!(
                        "  ✓ Profile '{}': loaded (window: {}x{}, backend: {:?})",
                        profile, config.window.width, config.window.height, config.graphics.backend
                    ));
                    for warning in suspicious_values(&config) {
                        details.push(format!("  ⚠ Profile '{}': {}", profile, warning));
                        has_warnings = true;
                    }
                }
                Err(e) => {
                    details.push(format!("  ✗ Profile '{}': failed to load - {}", profile, e));
                    all_success = false;
                }
            }
        }

        match AppConfig::load_from_env() {
            Ok(config) => {
                details.push(format!(
                    "  ✓ Environment config: profile '{}' loaded",
                    config.profile
                ));
            }
            Err(e) => {
                details.push(format!("  ⚠ Environment config: {}", e));
                has_warnings = true;
            }
        }

        let details_str = details.join("\n");

        if !all_success {
            CheckResult::fail("Failed to load one or more config profiles")
                .with_details(details_str)
        } else if has_warnings {
            CheckResult::warn("Config loaded with warnings").with_details(details_str)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_details(details_str)
        }
    }
}
