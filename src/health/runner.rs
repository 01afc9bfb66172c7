//! Runs checks in order and collects a report

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{debug, info_span, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Results of one health check run
#[derive(Debug)]
pub struct HealthCheckReport {
    /// Results in the order the checks were added, keyed by check name
    pub results: Vec<(String, CheckResult)>,
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl HealthCheckReport {
    /// No check failed
    pub fn is_healthy(&self) -> bool {
        self.failed == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// Worst status across all results, `Pass` for an empty report
    pub fn worst_status(&self) -> CheckStatus {
        self.results
            .iter()
            .map(|(_, result)| result.status)
            .max()
            .unwrap_or(CheckStatus::Pass)
    }

    /// Result of the named check, if it ran
    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.results
            .iter()
            .find(|(check_name, _)| check_name == name)
            .map(|(_, result)| result)
    }

    /// Process exit code: 0 all pass, 1 any failure, 2 warnings only
    pub fn exit_code(&self) -> i32 {
        match self.worst_status() {
            CheckStatus::Pass => 0,
            CheckStatus::Fail => 1,
            CheckStatus::Warn => 2,
        }
    }
}

/// Orchestrates health checks
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
    filter: Option<String>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            filter: None,
        }
    }

    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Only runs checks whose name contains `filter`, ignoring case
    pub fn with_filter(mut self, filter: Option<&str>) -> Self {
        self.filter = filter.map(str::to_lowercase);
        self
    }

    fn is_selected(&self, check: &dyn SystemCheck) -> bool {
        match &self.filter {
            Some(filter) => check.name().to_lowercase().contains(filter),
            None => true,
        }
    }

    /// Runs the selected checks and returns a report
    ///
    /// A check that panics is recorded as a failure of that check.
    pub fn run(self) -> HealthCheckReport {
        let mut results = Vec::new();
        let mut passed = 0;
        let mut warned = 0;
        let mut failed = 0;

        for check in self.checks.iter().filter(|c| self.is_selected(c.as_ref())) {
            let name = check.name();
            let _span = info_span!("health_check", check = name).entered();

            let start = Instant::now();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| check.check()));
            let mut result = match outcome {
                Ok(result) => result,
                Err(payload) => {
                    let reason = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    warn!(%reason, "Check panicked");
                    CheckResult::fail(format!("Check panicked: {reason}"))
                }
            }
            .with_duration(start.elapsed());

            if !check.is_critical() {
                result = result.downgraded();
            }

            match result.status {
                CheckStatus::Pass => passed += 1,
                CheckStatus::Warn => warned += 1,
                CheckStatus::Fail => failed += 1,
            }
            debug!(status = ?result.status, duration = ?result.duration, "{}", result.message);

            results.push((name.to_string(), result));
        }

        let total = results.len();

        HealthCheckReport {
            results,
            total,
            passed,
            warned,
            failed,
        }
    }
}

impl Default for HealthCheckRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, CheckStatus, bool);

    impl SystemCheck for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn check(&self) -> CheckResult {
            match self.1 {
                CheckStatus::Pass => CheckResult::pass("ok"),
                CheckStatus::Warn => CheckResult::warn("meh"),
                CheckStatus::Fail => CheckResult::fail("broken"),
            }
        }

        fn is_critical(&self) -> bool {
            self.2
        }
    }

    struct Panics;

    impl SystemCheck for Panics {
        fn name(&self) -> &'static str {
            "Panics"
        }

        fn check(&self) -> CheckResult {
            panic!("adapter exploded");
        }
    }

    #[test]
    fn test_counts_and_exit_code() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("A", CheckStatus::Pass, true))
            .add_check(Fixed("B", CheckStatus::Warn, true))
            .run();

        assert_eq!((report.passed, report.warned, report.failed), (1, 1, 0));
        assert_eq!(report.exit_code(), 2);
        assert_eq!(report.get("B").map(|r| r.status), Some(CheckStatus::Warn));
    }

    #[test]
    fn test_non_critical_failure_is_a_warning() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("Optional", CheckStatus::Fail, false))
            .run();

        assert!(report.is_healthy());
        assert_eq!(report.warned, 1);
    }

    #[test]
    fn test_panicking_check_fails() {
        let report = HealthCheckRunner::new().add_check(Panics).run();

        assert_eq!(report.failed, 1);
        let result = report.get("Panics").map(|r| r.message.clone());
        assert_eq!(result.as_deref(), Some("Check panicked: adapter exploded"));
    }

    #[test]
    fn test_filter_selects_by_name() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("Scene", CheckStatus::Pass, true))
            .add_check(Fixed("Shader Sources", CheckStatus::Pass, true))
            .with_filter(Some("SCENE"))
            .run();

        assert_eq!(report.total, 1);
        assert!(report.get("Scene").is_some());
    }

    #[test]
    fn test_empty_report_passes() {
        let report = HealthCheckRunner::new().run();
        assert_eq!(report.worst_status(), CheckStatus::Pass);
        assert_eq!(report.exit_code(), 0);
    }
}
