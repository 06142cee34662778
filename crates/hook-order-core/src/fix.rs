//! Automatic reordering of out-of-order hook statements.

use tracing::debug;

use crate::error::LintError;
use crate::syntax::SourceLanguage;
use crate::tracker::{CheckOptions, check_source};
use crate::types::{Reorder, Violation};

/// Upper bound on check-and-apply rounds in [`fix_source`].
pub const MAX_FIX_PASSES: usize = 10;

/// Result of applying one round of reorders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub output: String,
    pub applied: usize,
}

/// Result of fixing a source until it is clean or no more moves apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixReport {
    pub output: String,
    pub moves: usize,
    /// Violations left in `output`, positioned against the fixed text.
    pub remaining: Vec<Violation>,
}

impl FixReport {
    pub fn changed(&self) -> bool {
        self.moves > 0
    }
}

/// Apply every fixable violation whose edit does not overlap an earlier one.
///
/// Overlapping reorders are left for the next round, since each move shifts
/// the offsets of the statements around it.
pub fn apply_fixes(source: &str, violations: &[Violation]) -> FixOutcome {
    let mut reorders: Vec<&Reorder> = violations
        .iter()
        .filter_map(|v| v.reorder.as_ref())
        .filter(|r| r.insert_at < r.remove.start && r.remove.end <= source.len())
        .collect();
    reorders.sort_by_key(|r| r.footprint().start);

    let mut chosen: Vec<&Reorder> = Vec::new();
    let mut claimed_until = 0;
    for reorder in reorders {
        let footprint = reorder.footprint();
        if chosen.is_empty() || footprint.start >= claimed_until {
            claimed_until = footprint.end;
            chosen.push(reorder);
        }
    }

    let mut output = source.to_string();
    for reorder in chosen.iter().rev() {
        let mut moved = source[reorder.remove.clone()].to_string();
        if !moved.ends_with('\n') {
            moved.push('\n');
        }
        output.replace_range(reorder.remove.clone(), "");
        output.insert_str(reorder.insert_at, &moved);
    }

    FixOutcome {
        output,
        applied: chosen.len(),
    }
}

/// Check and reorder repeatedly until nothing fixable remains.
pub fn fix_source(
    source: &str,
    language: SourceLanguage,
    options: &CheckOptions,
) -> Result<FixReport, LintError> {
    let mut current = source.to_string();
    let mut moves = 0;

    for pass in 1..=MAX_FIX_PASSES {
        let violations = check_source(&current, language, options)?;
        let outcome = apply_fixes(&current, &violations);
        if outcome.applied == 0 {
            return Ok(FixReport {
                output: current,
                moves,
                remaining: violations,
            });
        }
        debug!(pass, applied = outcome.applied, "reordered hooks");
        moves += outcome.applied;
        current = outcome.output;
    }

    let remaining = check_source(&current, language, options)?;
    Ok(FixReport {
        output: current,
        moves,
        remaining,
    })
}

#[cfg(test)]
#[path = "fix_tests.rs"]
mod tests;
