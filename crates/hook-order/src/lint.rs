//! Per-file checking and fixing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hook_order_core::{CheckOptions, SourceLanguage, Violation, check_source, fix_source};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Outcome of checking one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Violations left in the file (after fixing, when fixing was requested).
    pub violations: Vec<Violation>,
    /// Number of hook statements moved by `--fix`.
    pub fixed: usize,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check (and optionally fix in place) a single file.
pub fn lint_file(path: &Path, options: &CheckOptions, fix: bool) -> Result<FileReport> {
    let language = SourceLanguage::from_path(path)
        .with_context(|| format!("cannot check {}", path.display()))?;
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if !fix {
        let violations = check_source(&source, language, options)
            .with_context(|| format!("failed to check {}", path.display()))?;
        return Ok(FileReport {
            path: path.to_path_buf(),
            violations,
            fixed: 0,
        });
    }

    let report = fix_source(&source, language, options)
        .with_context(|| format!("failed to fix {}", path.display()))?;
    if report.changed() {
        std::fs::write(path, &report.output)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), moves = report.moves, "rewrote file");
    }
    if !report.remaining.is_empty() && report.changed() {
        warn!(
            "{}: {} violation(s) could not be fixed automatically",
            path.display(),
            report.remaining.len()
        );
    }
    Ok(FileReport {
        path: path.to_path_buf(),
        violations: report.remaining,
        fixed: report.moves,
    })
}

/// Reports for the files that were checked, and errors for those that were not.
#[derive(Debug, Default)]
pub struct LintRun {
    /// One report per successfully checked file, in input order.
    pub reports: Vec<FileReport>,
    /// Files that could not be read, parsed or written.
    pub failures: Vec<anyhow::Error>,
}

impl LintRun {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Check every file in parallel. A failing file does not stop the others.
pub fn lint_files(files: &[PathBuf], options: &CheckOptions, fix: bool) -> LintRun {
    let results: Vec<Result<FileReport>> = files
        .par_iter()
        .map(|path| lint_file(path, options, fix))
        .collect();

    let mut run = LintRun::default();
    for result in results {
        match result {
            Ok(report) => run.reports.push(report),
            Err(err) => {
                warn!("skipping file: {err:#}");
                run.failures.push(err);
            }
        }
    }
    run
}

#[cfg(test)]
#[path = "lint_tests.rs"]
mod tests;
