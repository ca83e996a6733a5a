//! Worktree removal.
//!
//! A batch is processed strictly in input order, one worktree at a time.
//! Every input produces exactly one outcome; a failing item never stops the
//! batch and removed worktrees are never restored.

use super::manager::WorktreeManager;
use super::types::{CleanupOptions, CleanupResult, RemovalFailure, Worktree};
use crate::error::{BoscaioloError, Result};
use crate::git::{ExecOptions, GitExecutor};
use std::path::Path;
use tracing::{info, warn};

/// Result of the uncommitted-changes query for one worktree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirtyState {
    Clean,
    Dirty,
    /// The status query failed; treated like `Clean` so removal is attempted without force.
    Unknown(String),
}

impl DirtyState {
    /// Whether removal must pass `--force`.
    pub fn needs_force(&self) -> bool {
        matches!(self, DirtyState::Dirty)
    }
}

/// What happened to one worktree in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed,
    /// Skipped without running git; carries the failure message.
    Locked(String),
    /// Git refused or failed; carries git's message.
    Failed(String),
}

/// Failure message recorded for a locked worktree.
pub fn locked_message(reason: Option<&str>) -> String {
    format!("Locked: {}", reason.unwrap_or("no reason given"))
}

impl<G: GitExecutor> WorktreeManager<G> {
    /// Query `git status --porcelain` inside the worktree.
    pub fn has_uncommitted_changes(&self, worktree_path: &Path) -> DirtyState {
        match self
            .git
            .execute(&["status", "--porcelain"], &ExecOptions::in_dir(worktree_path))
        {
            Ok(status) if status.is_empty() => DirtyState::Clean,
            Ok(_) => DirtyState::Dirty,
            Err(e) => DirtyState::Unknown(e.to_string()),
        }
    }

    /// Remove one worktree with `git worktree remove <path> [--force]`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Worktree removed
    /// * `Err(BoscaioloError::CommandFailed)` - Git refused (dirty without force, locked, missing, ...)
    pub fn remove_worktree(&self, worktree_path: &Path, force: bool) -> Result<()> {
        let path_str = worktree_path.to_string_lossy();
        if path_str.starts_with('-') {
            return Err(BoscaioloError::UserError(format!(
                "refusing to remove worktree with option-like path: {}",
                path_str
            )));
        }

        let mut args = vec!["worktree", "remove", &*path_str];
        if force {
            args.push("--force");
        }

        self.git.execute(&args, &self.repo_options())?;
        Ok(())
    }

    /// Remove a batch of worktrees and report what happened to each.
    ///
    /// With `dry_run` set, returns an empty result without running any command.
    /// Locked worktrees are never removed, regardless of dirty state. Dirty
    /// worktrees are removed with `--force`.
    pub fn remove_worktrees(
        &self,
        worktrees: &[Worktree],
        options: CleanupOptions,
    ) -> CleanupResult {
        let mut result = CleanupResult::default();

        if options.dry_run {
            info!(event = "worktree.remove_dry_run", count = worktrees.len());
            return result;
        }

        for wt in worktrees {
            match self.remove_one(wt) {
                RemovalOutcome::Removed => result.removed.push(wt.path.clone()),
                RemovalOutcome::Locked(error) | RemovalOutcome::Failed(error) => {
                    result.failed.push(RemovalFailure {
                        path: wt.path.clone(),
                        error,
                    })
                }
            }
        }

        info!(
            event = "worktree.remove_batch_completed",
            removed = result.removed.len(),
            failed = result.failed.len()
        );

        result
    }

    fn remove_one(&self, wt: &Worktree) -> RemovalOutcome {
        if wt.is_locked() {
            let message = locked_message(wt.lock_reason());
            info!(
                event = "worktree.remove_skipped_locked",
                path = %wt.path.display(),
                reason = %message
            );
            return RemovalOutcome::Locked(message);
        }

        let dirty = self.has_uncommitted_changes(&wt.path);
        if let DirtyState::Unknown(reason) = &dirty {
            warn!(
                event = "worktree.dirty_check_failed",
                path = %wt.path.display(),
                error = %reason
            );
        }

        let force = dirty.needs_force();
        match self.remove_worktree(&wt.path, force) {
            Ok(()) => {
                info!(
                    event = "worktree.remove_completed",
                    path = %wt.path.display(),
                    force = force
                );
                RemovalOutcome::Removed
            }
            Err(e) => {
                warn!(
                    event = "worktree.remove_failed",
                    path = %wt.path.display(),
                    force = force,
                    error = %e
                );
                RemovalOutcome::Failed(e.to_string())
            }
        }
    }
}
