//! Test-file discovery.
//!
//! Walks directories with the `ignore` walker (so `.gitignore` and hidden
//! directories are skipped) and keeps files whose extension is configured.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use hook_order_config::FilesConfig;
use hook_order_core::SourceLanguage;
use tracing::{debug, warn};

/// Expand `paths` into the sorted, de-duplicated list of files to check.
///
/// Files named explicitly are kept whenever their language is known, even if
/// they match an exclude pattern or an unlisted extension.
pub fn discover_files(paths: &[PathBuf], files: &FilesConfig) -> Result<Vec<PathBuf>> {
    let excludes = files.exclude_patterns()?;
    let mut found = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_checkable(path) {
                found.push(path.clone());
            } else {
                warn!("skipping {}: unsupported file type", path.display());
            }
            continue;
        }
        if !path.is_dir() {
            bail!("path does not exist: {}", path.display());
        }

        let walker = ignore::WalkBuilder::new(path).require_git(false).build();
        for entry in walker.filter_map(|e| {
            e.map_err(|err| warn!("failed to read directory entry: {err}"))
                .ok()
        }) {
            let candidate = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if !files.matches_extension(candidate) || !is_checkable(candidate) {
                continue;
            }
            if excludes.iter().any(|p| p.matches_path(candidate)) {
                debug!("excluded {}", candidate.display());
                continue;
            }
            found.push(candidate.to_path_buf());
        }
    }

    found.sort();
    found.dedup();
    debug!(count = found.len(), "discovered files");
    Ok(found)
}

fn is_checkable(path: &Path) -> bool {
    SourceLanguage::from_path(path).is_ok()
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
