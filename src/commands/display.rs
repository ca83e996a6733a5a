//! Text rendering shared by the commands.

use crate::worktree::{CleanupResult, Worktree};
use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::path::Path;

/// Width of the branch column.
const BRANCH_WIDTH: usize = 20;

/// Path relative to the repository root when it lies inside it.
pub(crate) fn make_relative(path: &Path, repo_root: &Path) -> String {
    match path.strip_prefix(repo_root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

/// "today", "1 day ago", "N days ago".
pub(crate) fn days_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match (now - then).num_days() {
        days if days <= 0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        days => format!("{} days ago", days),
    }
}

/// One table row: branch padded to the column width, then the path.
pub(crate) fn format_row(wt: &Worktree, repo_root: &Path, verbose: bool) -> String {
    let mut row = format!(
        "{:<width$} {}",
        wt.branch_label(),
        make_relative(&wt.path, repo_root),
        width = BRANCH_WIDTH
    );
    if verbose {
        row.push(' ');
        row.push_str(wt.short_commit());
        if wt.is_locked() {
            row.push_str(" [locked]");
        }
    }
    row
}

/// Render worktrees as a table, one per line.
pub(crate) fn write_table<W: Write>(
    out: &mut W,
    worktrees: &[Worktree],
    repo_root: &Path,
    verbose: bool,
    now: DateTime<Utc>,
) -> io::Result<()> {
    writeln!(out)?;
    for wt in worktrees {
        writeln!(out, "{}", format_row(wt, repo_root, verbose))?;
        if verbose && let Some(last_accessed) = wt.last_accessed {
            writeln!(out, "  Last accessed: {}", days_ago(last_accessed, now))?;
        }
    }
    writeln!(out)
}

/// Summary after a real removal batch.
pub(crate) fn write_cleanup_result<W: Write>(
    out: &mut W,
    result: &CleanupResult,
    repo_root: &Path,
) -> io::Result<()> {
    writeln!(out, "Removed {} worktrees", result.removed.len())?;
    if result.has_failures() {
        writeln!(out)?;
        writeln!(out, "Failed to remove {} worktrees:", result.failed.len())?;
        for failure in &result.failed {
            writeln!(
                out,
                "  • {}: {}",
                make_relative(&failure.path, repo_root),
                failure.error
            )?;
        }
    }
    Ok(())
}
