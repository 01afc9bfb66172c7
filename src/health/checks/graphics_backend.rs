//! Graphics backend health check

use crate::app::config::GraphicsBackend;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that wgpu finds an adapter for the configured backend
pub struct GraphicsBackendCheck {
    backend: GraphicsBackend,
}

impl GraphicsBackendCheck {
    pub fn new() -> Self {
        Self::for_backend(GraphicsBackend::Auto)
    }

    pub fn for_backend(backend: GraphicsBackend) -> Self {
        Self { backend }
    }
}

impl Default for GraphicsBackendCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for GraphicsBackendCheck {
    fn name(&self) -> &'static str {
        "Graphics Backend"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates wgpu instance creation and adapter availability")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        let backends = self.backend.to_wgpu();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });
        details.push(format!("  ✓ wgpu instance created ({:?})", self.backend));

        let adapters: Vec<_> = instance.enumerate_adapters(backends).into_iter().collect();

        // Headless machines (CI) legitimately have no adapter; the demo cannot start there
        if adapters.is_empty() {
            details.push("  ⚠ No graphics adapters found".to_string());
            return CheckResult::warn(format!("No adapter for backend {:?}", self.backend))
                .with_details(details.join("\n"))
                .with_hint("Install GPU drivers or try APP_GRAPHICS__BACKEND=gl");
        }

        details.push(format!("  ✓ Found {} adapter(s)", adapters.len()));

        let mut has_hardware = false;
        for (i, adapter) in adapters.iter().enumerate() {
            let info = adapter.get_info();
            let device_type = match info.device_type {
                wgpu::DeviceType::DiscreteGpu => "Discrete GPU",
                wgpu::DeviceType::IntegratedGpu => "Integrated GPU",
                wgpu::DeviceType::VirtualGpu => "Virtual GPU",
                wgpu::DeviceType::Cpu => "CPU",
                wgpu::DeviceType::Other => "Other",
            };
            has_hardware |= matches!(
                info.device_type,
                wgpu::DeviceType::DiscreteGpu | wgpu::DeviceType::IntegratedGpu
            );

            details.push(format!(
                "    [{i}] {} - {} ({:?}, driver: {})",
                info.name, device_type, info.backend, info.driver
            ));
        }

        if has_hardware {
            CheckResult::pass(format!("{} adapter(s) found", adapters.len()))
                .with_details(details.join("\n"))
        } else {
            CheckResult::warn(format!(
                "{} adapter(s) found (no hardware GPU detected)",
                adapters.len()
            ))
            .with_details(details.join("\n"))
        }
    }
}
