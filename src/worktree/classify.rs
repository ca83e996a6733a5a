//! Worktree cohorts: deleted branch, stale directory, merged branch.
//!
//! Each finder lists worktrees afresh and filters them; none of them changes
//! the repository. A detached worktree only ever qualifies as stale.

use super::manager::WorktreeManager;
use super::parser::parse_merged_branches;
use super::types::Worktree;
use crate::error::Result;
use crate::git::{GitExecutor, validate_git_arg};
use chrono::{DateTime, TimeDelta, Utc};
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, info};

/// What a filesystem probe found for a worktree directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessProbe {
    /// Directory exists; last access (modification on Windows) time.
    Found(DateTime<Utc>),
    /// Directory no longer exists.
    Missing,
    /// Directory could not be inspected.
    Unknown(String),
}

/// Stat `path` and report its last access time.
pub fn probe_last_access(path: &Path) -> AccessProbe {
    match fs::metadata(path) {
        Ok(metadata) => match last_access_time(&metadata) {
            Ok(time) => AccessProbe::Found(time.into()),
            Err(e) => AccessProbe::Unknown(e.to_string()),
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => AccessProbe::Missing,
        Err(e) => AccessProbe::Unknown(e.to_string()),
    }
}

#[cfg(windows)]
fn last_access_time(metadata: &Metadata) -> io::Result<SystemTime> {
    // atime is not maintained reliably on Windows.
    metadata.modified()
}

#[cfg(not(windows))]
fn last_access_time(metadata: &Metadata) -> io::Result<SystemTime> {
    metadata.accessed().or_else(|_| metadata.modified())
}

/// Instant before which a worktree counts as stale.
pub fn stale_threshold(now: DateTime<Utc>, threshold_days: u32) -> DateTime<Utc> {
    now.checked_sub_signed(TimeDelta::days(i64::from(threshold_days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Strictly older than the threshold; equal is not stale.
pub fn is_stale(last_accessed: DateTime<Utc>, threshold: DateTime<Utc>) -> bool {
    last_accessed < threshold
}

impl<G: GitExecutor> WorktreeManager<G> {
    /// Worktrees whose branch no longer exists.
    ///
    /// Prunable worktrees are not included unless their branch is also gone;
    /// callers wanting both combine `is_prunable` themselves.
    pub fn find_deleted_branch_worktrees(&self) -> Result<Vec<Worktree>> {
        let deleted: Vec<Worktree> = self
            .list_worktrees()?
            .into_iter()
            .filter(|wt| wt.branch_deleted)
            .collect();

        info!(event = "worktree.deleted_scan_completed", count = deleted.len());
        Ok(deleted)
    }

    /// Worktrees not accessed in the last `threshold_days` days.
    pub fn find_stale_worktrees(&self, threshold_days: u32) -> Result<Vec<Worktree>> {
        self.find_stale_worktrees_at(threshold_days, Utc::now())
    }

    /// Staleness scan against an explicit "now".
    ///
    /// Worktrees whose directory is missing or unreadable are skipped. Results
    /// carry `last_accessed`.
    pub fn find_stale_worktrees_at(
        &self,
        threshold_days: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<Worktree>> {
        let threshold = stale_threshold(now, threshold_days);
        let mut stale = Vec::new();

        for wt in self.list_worktrees()? {
            match probe_last_access(&wt.path) {
                AccessProbe::Found(last_accessed) => {
                    if is_stale(last_accessed, threshold) {
                        stale.push(wt.with_last_accessed(last_accessed));
                    }
                }
                AccessProbe::Missing => {
                    debug!(
                        event = "worktree.stale_probe_skipped",
                        path = %wt.path.display(),
                        reason = "missing"
                    );
                }
                AccessProbe::Unknown(reason) => {
                    debug!(
                        event = "worktree.stale_probe_skipped",
                        path = %wt.path.display(),
                        reason = %reason
                    );
                }
            }
        }

        info!(
            event = "worktree.stale_scan_completed",
            threshold_days = threshold_days,
            count = stale.len()
        );
        Ok(stale)
    }

    /// Worktrees whose branch is merged into `base_branch` (never `base_branch` itself).
    ///
    /// # Returns
    ///
    /// * `Err(BoscaioloError::UserError)` - `base_branch` is empty or looks like an option
    /// * `Err(BoscaioloError::CommandFailed)` - e.g. `base_branch` does not exist
    pub fn find_merged_branch_worktrees(&self, base_branch: &str) -> Result<Vec<Worktree>> {
        validate_git_arg(base_branch, "base branch")?;

        let worktrees = self.list_worktrees()?;
        let output = self
            .git
            .execute(&["branch", "--merged", base_branch], &self.repo_options())?;
        let merged_branches = parse_merged_branches(&output, base_branch);

        let merged: Vec<Worktree> = worktrees
            .into_iter()
            .filter(|wt| {
                wt.branch
                    .as_ref()
                    .is_some_and(|branch| merged_branches.contains(branch))
            })
            .collect();

        info!(
            event = "worktree.merged_scan_completed",
            base_branch = base_branch,
            count = merged.len()
        );
        Ok(merged)
    }
}
