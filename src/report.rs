//! Human-readable and JSON rendering of an [`AuditReport`].

use crate::audit::{AuditReport, PhaseReport};
use crate::config::DOMAIN_LIST;

const RULE: &str = "=================================================================";

/// Formats the report as text, one `CODE: message` line per diagnostic.
#[must_use]
pub fn format_report(report: &AuditReport) -> String {
    let mut lines = Vec::new();

    if !report.invalid_domains.is_empty() {
        lines.push(format!(
            "Invalid domain filter: {}. Must be a subset of: {}",
            report.invalid_domains.join(", "),
            DOMAIN_LIST.join(", "),
        ));
    }

    for phase in report.phases() {
        lines.push(RULE.to_string());
        lines.push(phase.phase.title().to_string());
        push_phase(&mut lines, phase);
    }

    if !report.warnings.is_empty() {
        lines.push(RULE.to_string());
        lines.push(format!("Skipped during scanning ({}):", report.warnings.len()));
        for warning in &report.warnings {
            lines.push(format!("  {warning}"));
        }
    }

    lines.join("\n")
}

fn push_phase(lines: &mut Vec<String>, phase: &PhaseReport) {
    lines.push("-".repeat(RULE.len()));
    for diagnostic in &phase.diagnostics {
        lines.push(diagnostic.to_string());
    }
    lines.push("-".repeat(RULE.len()));
    lines.push(format!("Total: {} error(s)", phase.diagnostics.len()));
}

/// Formats the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error string if serialization fails.
pub fn format_json(report: &AuditReport) -> Result<String, String> {
    serde_json::to_string_pretty(report).map_err(|e| format!("failed to serialize report: {e}"))
}
