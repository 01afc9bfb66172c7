//! Health check system for validating the demo without opening a window
//!
//! Useful for:
//! - Validating application startup on a new machine
//! - CI health checks
//! - Debugging missing assets or graphics drivers
//!
//! # Example
//!
//! ```no_run
//! use cube_starter::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(SceneCheck::new())
//!     .add_check(ShaderSourcesCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("All systems operational!");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

use crate::app::AppConfig;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_hints, format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    run_checks_for(&AppConfig::builtin("release"))
}

/// Runs all health checks against an explicit configuration
pub fn run_checks_for(config: &AppConfig) -> HealthCheckReport {
    checks_for(config).run()
}

/// The full check suite for a configuration, not yet run
pub fn checks_for(config: &AppConfig) -> HealthCheckRunner {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::SystemInfoCheck::new())
        .add_check(checks::GraphicsBackendCheck::for_backend(
            config.graphics.backend,
        ))
        .add_check(checks::GuiOverlayCheck::new())
        .add_check(checks::DebugUICheck::new())
        .add_check(checks::SceneCheck::with_config(config.clone()))
        .add_check(checks::ShaderSourcesCheck::with_paths(
            config.scene.vertex_shader.clone(),
            config.scene.fragment_shader.clone(),
        ))
}
