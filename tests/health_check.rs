//! Integration tests for the health check system

use cube_starter::app::AppConfig;
use cube_starter::health::{self, CheckStatus, HealthCheckRunner, SystemCheck, checks::*};

#[test]
fn test_all_health_checks() {
    let report = health::run_all_checks();

    // Print report for debugging if tests fail
    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }

    // Headless machines may warn (no adapter, no git), but nothing may fail
    assert!(
        report.is_healthy(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
}

#[test]
fn test_config_check() {
    let result = ConfigCheck::new().check();

    assert!(
        result.status.is_ok(),
        "Config check failed: {}",
        result.message
    );
}

#[test]
fn test_scene_check() {
    let result = SceneCheck::new().check();

    assert!(
        result.status.is_ok(),
        "Scene check failed: {}",
        result.message
    );
}

#[test]
fn test_scene_check_missing_texture_warns() {
    let mut config = AppConfig::builtin("release");
    config.scene.texture_path = "res/does-not-exist.png".into();

    let result = SceneCheck::with_config(config).check();

    assert_eq!(result.status, CheckStatus::Warn, "{}", result.message);
}

#[test]
fn test_shader_sources_check() {
    let result = ShaderSourcesCheck::new().check();

    assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
}

#[test]
fn test_shader_sources_check_missing_file_warns() {
    let result = ShaderSourcesCheck::with_paths("res/missing.wgsl", "res/fragment.wgsl").check();

    assert_eq!(result.status, CheckStatus::Warn, "{}", result.message);
    assert!(result.message.starts_with('1'));
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().check();

    assert!(
        result.status.is_ok(),
        "Build info check failed: {}",
        result.message
    );
}

#[test]
fn test_system_info_check() {
    let result = SystemInfoCheck::new().check();

    assert!(
        result.status.is_ok(),
        "System info check failed: {}",
        result.message
    );
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::new())
        .add_check(SceneCheck::new())
        .run();

    assert_eq!(report.total, 2, "Expected 2 checks in report");
    assert_eq!(report.passed + report.warned + report.failed, report.total);
}

#[test]
fn test_report_exit_codes() {
    let report = HealthCheckRunner::new().add_check(ConfigCheck::new()).run();

    if report.failed > 0 {
        assert_eq!(report.exit_code(), 1);
    } else if report.warned > 0 {
        assert_eq!(report.exit_code(), 2);
    } else {
        assert_eq!(report.exit_code(), 0);
    }
}

#[test]
fn test_graphics_backend_check() {
    let result = GraphicsBackendCheck::new().check();

    assert!(
        result.status.is_ok(),
        "Graphics backend check failed: {}",
        result.message
    );
}

#[test]
fn test_debug_ui_check() {
    let result = DebugUICheck::new().check();

    assert!(
        result.status.is_ok(),
        "Debug UI check failed: {}",
        result.message
    );
}

#[test]
fn test_gui_overlay_check() {
    let result = GuiOverlayCheck::new().check();

    assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
}
