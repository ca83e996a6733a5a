//! Implementation of the `boscaiolo list` command.

use super::Session;
use super::display::write_table;
use crate::cli::ListArgs;
use crate::error::{BoscaioloError, Result};
use crate::exit_codes;
use crate::git::GitExecutor;
use crate::worktree::Worktree;
use chrono::Utc;
use std::io::Write;

/// Counts shown under the listing.
#[derive(Debug, Default, PartialEq, Eq)]
struct ListStats {
    total: usize,
    deleted: usize,
    prunable: usize,
    locked: usize,
}

impl ListStats {
    fn from_worktrees(worktrees: &[Worktree]) -> Self {
        Self {
            total: worktrees.len(),
            deleted: worktrees.iter().filter(|wt| wt.branch_deleted).count(),
            prunable: worktrees.iter().filter(|wt| wt.is_prunable).count(),
            locked: worktrees.iter().filter(|wt| wt.is_locked()).count(),
        }
    }
}

/// Execute the `boscaiolo list` command.
///
/// Lists every worktree, including the main one. Never removes anything.
pub(crate) fn cmd_list<G: GitExecutor, W: Write>(
    session: &Session<G>,
    args: &ListArgs,
    out: &mut W,
) -> Result<i32> {
    let worktrees = session.manager.list_worktrees()?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &worktrees)
            .map_err(|e| BoscaioloError::Io(format!("failed to write JSON: {}", e)))?;
        writeln!(out)?;
        return Ok(exit_codes::SUCCESS);
    }

    if worktrees.is_empty() {
        writeln!(out, "No worktrees found")?;
        return Ok(exit_codes::SUCCESS);
    }

    writeln!(out, "Worktrees ({} total)", worktrees.len())?;
    write_table(out, &worktrees, &session.repo_root, args.verbose, Utc::now())?;

    let stats = ListStats::from_worktrees(&worktrees);
    writeln!(out, "Statistics:")?;
    writeln!(out, "  • Total: {}", stats.total)?;
    if stats.deleted > 0 {
        writeln!(out, "  • Deleted branches: {}", stats.deleted)?;
    }
    if stats.prunable > 0 {
        writeln!(out, "  • Prunable: {}", stats.prunable)?;
    }
    if stats.locked > 0 {
        writeln!(out, "  • Locked: {}", stats.locked)?;
    }

    Ok(exit_codes::SUCCESS)
}
