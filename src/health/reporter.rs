//! Terminal output for health check reports

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::check::CheckStatus;
use super::runner::HealthCheckReport;

/// Renders the report as a table followed by a summary
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Check", "Status", "Time", "Result"]);

    for (name, result) in &report.results {
        builder.push_record([
            name.clone(),
            result.status.as_colored_str(),
            format!("{:.2?}", result.duration),
            result.message.clone(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{table}\n{}", format_summary(report))
}

fn format_summary(report: &HealthCheckReport) -> String {
    let mut lines = vec![
        String::new(),
        "Summary".bold().underline().to_string(),
        format!("  {} checks run", report.total),
        format!("  {} {} passed", CheckStatus::Pass.symbol().green(), report.passed),
    ];
    if report.warned > 0 {
        lines.push(format!(
            "  {} {} warned",
            CheckStatus::Warn.symbol().yellow(),
            report.warned
        ));
    }
    if report.failed > 0 {
        lines.push(format!(
            "  {} {} failed",
            CheckStatus::Fail.symbol().red(),
            report.failed
        ));
    }

    lines.push(String::new());
    let verdict = match report.worst_status() {
        CheckStatus::Pass => "Ready to run".green().bold(),
        CheckStatus::Warn => "Ready to run with fallbacks".yellow().bold(),
        CheckStatus::Fail => "Demo cannot start".red().bold(),
    };
    lines.push(format!("  {verdict}"));
    lines.push(String::new());

    lines.join("\n")
}

/// Hints for every check that did not pass, one per line
pub fn format_hints(report: &HealthCheckReport) -> Option<String> {
    let hints: Vec<String> = report
        .results
        .iter()
        .filter(|(_, result)| result.status != CheckStatus::Pass)
        .filter_map(|(name, result)| {
            result
                .hint
                .as_ref()
                .map(|hint| format!("  {} {name}: {hint}", result.status.symbol()))
        })
        .collect();

    (!hints.is_empty()).then(|| hints.join("\n"))
}

/// Prints the table, per-check details and hints to stdout
pub fn print_report(report: &HealthCheckReport) {
    println!("{}", format_report(report));

    for (name, result) in &report.results {
        if let Some(details) = &result.details {
            println!("\n{}", name.bold());
            println!("{details}");
        }
    }

    if let Some(hints) = format_hints(report) {
        println!("\n{}", "Hints".bold().underline());
        println!("{hints}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::check::{CheckResult, SystemCheck};
    use crate::health::runner::HealthCheckRunner;

    struct MissingTexture;

    impl SystemCheck for MissingTexture {
        fn name(&self) -> &'static str {
            "Texture"
        }

        fn check(&self) -> CheckResult {
            CheckResult::warn("texture missing").with_hint("copy res/texture.png next to the binary")
        }
    }

    #[test]
    fn test_report_lists_every_check() {
        colored::control::set_override(false);
        let report = HealthCheckRunner::new().add_check(MissingTexture).run();

        let text = format_report(&report);
        assert!(text.contains("Texture"));
        assert!(text.contains("texture missing"));
        assert!(text.contains("Ready to run with fallbacks"));
    }

    #[test]
    fn test_hints_only_for_non_passing_checks() {
        let report = HealthCheckRunner::new().add_check(MissingTexture).run();
        let hints = format_hints(&report).unwrap_or_default();
        assert!(hints.contains("Texture: copy res/texture.png"));

        let empty = HealthCheckRunner::new().run();
        assert!(format_hints(&empty).is_none());
    }
}
