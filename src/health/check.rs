//! Check trait and result types

use std::time::Duration;

/// Outcome of one check, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckStatus {
    /// Everything the demo needs is in place
    Pass,
    /// The demo starts but falls back to something (checkerboard, default shader)
    Warn,
    /// The demo cannot start
    Fail,
}

impl CheckStatus {
    /// Returns true unless the check failed
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Pass | CheckStatus::Warn)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "✓",
            CheckStatus::Warn => "⚠",
            CheckStatus::Fail => "✗",
        }
    }

    /// Status label colored for terminals
    pub fn as_colored_str(&self) -> String {
        use colored::Colorize;
        match self {
            CheckStatus::Pass => "PASS".green().to_string(),
            CheckStatus::Warn => "WARN".yellow().to_string(),
            CheckStatus::Fail => "FAIL".red().to_string(),
        }
    }
}

/// Result of a single check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// One-line summary shown in the report table
    pub message: String,
    /// Multi-line breakdown printed below the table
    pub details: Option<String>,
    /// What the user can do about a warning or failure
    pub hint: Option<String>,
    /// Wall time, filled in by the runner
    pub duration: Duration,
}

impl CheckResult {
    fn with_status(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            hint: None,
            duration: Duration::ZERO,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Fail, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Turns a failure into a warning, keeping message and details
    pub fn downgraded(mut self) -> Self {
        if self.status == CheckStatus::Fail {
            self.status = CheckStatus::Warn;
        }
        self
    }
}

/// A startup check that runs without a window
pub trait SystemCheck {
    /// Name shown in the report
    fn name(&self) -> &'static str;

    fn check(&self) -> CheckResult;

    fn description(&self) -> Option<&'static str> {
        None
    }

    /// Whether a failure here prevents the demo from starting
    ///
    /// Failures of non-critical checks are reported as warnings.
    fn is_critical(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering() {
        assert!(CheckStatus::Pass < CheckStatus::Warn);
        assert!(CheckStatus::Warn < CheckStatus::Fail);
        assert_eq!(
            [CheckStatus::Warn, CheckStatus::Pass].into_iter().max(),
            Some(CheckStatus::Warn)
        );
    }

    #[test]
    fn test_downgrade_only_affects_failures() {
        assert_eq!(CheckResult::fail("x").downgraded().status, CheckStatus::Warn);
        assert_eq!(CheckResult::pass("x").downgraded().status, CheckStatus::Pass);
    }

    #[test]
    fn test_builder_keeps_hint() {
        let result = CheckResult::warn("no adapter").with_hint("try the gl backend");
        assert_eq!(result.hint.as_deref(), Some("try the gl backend"));
        assert!(result.details.is_none());
    }
}
