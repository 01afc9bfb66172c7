//! System information health check

use sysinfo::System;

use crate::app::debug_ui::SystemSummary;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that the host facts shown in the debug window can be gathered
pub struct SystemInfoCheck;

impl SystemInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SystemInfoCheck {
    fn name(&self) -> &'static str {
        "System Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates OS, CPU, and memory information gathering")
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn check(&self) -> CheckResult {
        let system = SystemSummary::gather();
        let mut details = vec![
            format!("  OS: {}", system.os),
            format!("  Kernel: {}", system.kernel),
        ];

        if system.physical_cores == 0 || system.logical_cores == 0 {
            return CheckResult::warn("Unable to detect CPU cores")
                .with_details(details.join("\n"));
        }
        details.push(format!(
            "  CPU cores: {} physical, {} logical",
            system.physical_cores, system.logical_cores
        ));

        if system.total_memory_gb < 1.0 {
            return CheckResult::warn("Low memory detected").with_details(details.join("\n"));
        }
        details.push(format!("  Memory: {:.1} GB total", system.total_memory_gb));

        if let Some(hostname) = System::host_name() {
            details.push(format!("  Hostname: {}", hostname));
        }

        CheckResult::pass("System info gathered successfully").with_details(details.join("\n"))
    }
}
