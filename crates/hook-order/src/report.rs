//! Text and JSON rendering of check results.

use anyhow::{Context, Result};
use hook_order_config::Severity;
use hook_order_core::{HookKind, RULE_ID};
use serde::Serialize;

use crate::lint::FileReport;

/// Aggregate counts across all checked files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub files_with_problems: usize,
    pub problems: usize,
    pub fixable: usize,
    pub fixed: usize,
}

impl Summary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self {
            files: reports.len(),
            ..Self::default()
        };
        for report in reports {
            if !report.is_clean() {
                summary.files_with_problems += 1;
            }
            summary.problems += report.violations.len();
            summary.fixable += report.violations.iter().filter(|v| v.is_fixable()).count();
            summary.fixed += report.fixed;
        }
        summary
    }

    /// One-line human summary.
    pub fn describe(&self) -> String {
        let mut line = if self.problems == 0 {
            format!("no problems in {} file(s)", self.files)
        } else {
            format!(
                "{} problem(s) in {} file(s)",
                self.problems, self.files_with_problems
            )
        };
        if self.fixed > 0 {
            line.push_str(&format!(", {} hook(s) reordered", self.fixed));
        } else if self.fixable > 0 {
            line.push_str(&format!(", {} fixable with --fix", self.fixable));
        }
        line
    }
}

/// One violation as emitted by `--format json`.
#[derive(Debug, Serialize)]
struct JsonViolation {
    path: String,
    line: usize,
    column: usize,
    severity: &'static str,
    rule: &'static str,
    current_hook: HookKind,
    previous_hook: HookKind,
    message: String,
    fixable: bool,
}

/// `path:line:column  severity  message  rule`, one violation per line.
pub fn render_text(reports: &[FileReport], severity: Severity) -> String {
    let mut out = String::new();
    for report in reports {
        for violation in &report.violations {
            out.push_str(&format!(
                "{}:{}  {}  {}  {}\n",
                report.path.display(),
                violation.position,
                severity_label(severity),
                violation.message(),
                RULE_ID
            ));
        }
    }
    out
}

pub fn render_json(reports: &[FileReport], severity: Severity) -> Result<String> {
    let rows: Vec<JsonViolation> = reports
        .iter()
        .flat_map(|report| {
            report.violations.iter().map(move |violation| JsonViolation {
                path: report.path.display().to_string(),
                line: violation.position.line,
                column: violation.position.column,
                severity: severity_label(severity),
                rule: RULE_ID,
                current_hook: violation.current,
                previous_hook: violation.previous,
                message: violation.message(),
                fixable: violation.is_fixable(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&rows).context("failed to serialize report")
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Off => "off",
        Severity::Warn => "warning",
        Severity::Error => "error",
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
