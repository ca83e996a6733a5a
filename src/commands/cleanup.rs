//! Implementation of the `stale`, `deleted` and `merged` commands.
//!
//! All three share one flow:
//! - Scan for the cohort (read-only)
//! - Print the candidates
//! - `--dry-run`: report what would be removed
//! - Without `--yes`: ask for `--yes` and stop
//! - With `--yes`: remove the batch and report each failure
//!
//! A batch with failures exits with `PARTIAL_FAILURE`.

use super::Session;
use super::display::{write_cleanup_result, write_table};
use crate::cli::{CleanupFlags, DeletedArgs, MergedArgs, StaleArgs};
use crate::error::Result;
use crate::exit_codes;
use crate::git::GitExecutor;
use crate::worktree::{CleanupOptions, Worktree};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::io::Write;
use tracing::info;

/// Which worktrees a cleanup command targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Cohort {
    Stale { days: u32 },
    Deleted,
    Merged { base: String },
}

impl Cohort {
    fn noun(&self) -> &'static str {
        match self {
            Cohort::Stale { .. } => "stale",
            Cohort::Deleted => "deleted branch",
            Cohort::Merged { .. } => "merged",
        }
    }

    fn qualifier(&self) -> String {
        match self {
            Cohort::Stale { days } => format!(" (older than {} days)", days),
            Cohort::Deleted => String::new(),
            Cohort::Merged { base } => format!(" (merged into {})", base),
        }
    }
}

pub(crate) fn cmd_stale<G: GitExecutor, W: Write>(
    session: &Session<G>,
    args: &StaleArgs,
    out: &mut W,
) -> Result<i32> {
    let days = args.days.unwrap_or(session.config.stale_days);
    run_cleanup(session, &Cohort::Stale { days }, args.flags, out, Utc::now())
}

pub(crate) fn cmd_deleted<G: GitExecutor, W: Write>(
    session: &Session<G>,
    args: &DeletedArgs,
    out: &mut W,
) -> Result<i32> {
    run_cleanup(session, &Cohort::Deleted, args.flags, out, Utc::now())
}

pub(crate) fn cmd_merged<G: GitExecutor, W: Write>(
    session: &Session<G>,
    args: &MergedArgs,
    out: &mut W,
) -> Result<i32> {
    let base = args
        .base
        .clone()
        .unwrap_or_else(|| session.config.base_branch.clone());
    run_cleanup(session, &Cohort::Merged { base }, args.flags, out, Utc::now())
}

/// Scan for the cohort, applying the config's main-worktree and prunable policies.
pub(crate) fn find_candidates<G: GitExecutor>(
    session: &Session<G>,
    cohort: &Cohort,
    now: DateTime<Utc>,
) -> Result<Vec<Worktree>> {
    let manager = &session.manager;
    let found = match cohort {
        Cohort::Stale { days } => manager.find_stale_worktrees_at(*days, now)?,
        Cohort::Merged { base } => manager.find_merged_branch_worktrees(base)?,
        Cohort::Deleted => {
            let mut deleted = manager.find_deleted_branch_worktrees()?;
            if session.config.include_prunable {
                let seen: HashSet<_> = deleted.iter().map(|wt| wt.path.clone()).collect();
                let prunable = manager
                    .list_worktrees()?
                    .into_iter()
                    .filter(|wt| wt.is_prunable && !seen.contains(&wt.path));
                deleted.extend(prunable);
            }
            deleted
        }
    };

    Ok(session.removable(found))
}

/// Shared scan/confirm/remove flow. Returns the exit code.
pub(crate) fn run_cleanup<G: GitExecutor, W: Write>(
    session: &Session<G>,
    cohort: &Cohort,
    flags: CleanupFlags,
    out: &mut W,
    now: DateTime<Utc>,
) -> Result<i32> {
    let candidates = find_candidates(session, cohort, now)?;

    if candidates.is_empty() {
        writeln!(
            out,
            "No {} worktrees found{}",
            cohort.noun(),
            cohort.qualifier()
        )?;
        return Ok(exit_codes::SUCCESS);
    }

    writeln!(
        out,
        "Found {} {} worktrees{}:",
        candidates.len(),
        cohort.noun(),
        cohort.qualifier()
    )?;
    write_table(out, &candidates, &session.repo_root, flags.verbose, now)?;

    if flags.dry_run {
        session
            .manager
            .remove_worktrees(&candidates, CleanupOptions { dry_run: true });
        writeln!(out, "[DRY RUN] Would remove {} worktrees", candidates.len())?;
        return Ok(exit_codes::SUCCESS);
    }

    if !flags.yes {
        writeln!(out, "Run with --yes to remove these worktrees")?;
        return Ok(exit_codes::SUCCESS);
    }

    let result = session
        .manager
        .remove_worktrees(&candidates, CleanupOptions::default());
    write_cleanup_result(out, &result, &session.repo_root)?;

    info!(
        event = "cleanup.completed",
        cohort = cohort.noun(),
        removed = result.removed.len(),
        failed = result.failed.len()
    );

    if result.has_failures() {
        Ok(exit_codes::PARTIAL_FAILURE)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}
