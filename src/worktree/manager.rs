//! Worktree listing: porcelain records fused with the branch listing.

use super::parser::{parse_branch_list, parse_worktree_list};
use super::types::Worktree;
use crate::error::Result;
use crate::git::{ExecOptions, GitExecutor, SystemGit};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads, classifies and removes the worktrees of one repository.
///
/// Listing and classification are read-only; only
/// [`remove_worktrees`](WorktreeManager::remove_worktrees) changes the repository.
#[derive(Debug, Clone)]
pub struct WorktreeManager<G: GitExecutor = SystemGit> {
    pub(super) git: G,
    repo_dir: Option<PathBuf>,
}

impl WorktreeManager<SystemGit> {
    /// Manager using the system `git` in the process working directory.
    pub fn new() -> Self {
        Self::with_executor(SystemGit)
    }
}

impl Default for WorktreeManager<SystemGit> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GitExecutor> WorktreeManager<G> {
    /// Manager backed by a specific executor.
    pub fn with_executor(git: G) -> Self {
        Self {
            git,
            repo_dir: None,
        }
    }

    /// Run repository-level commands in `dir` instead of the process working directory.
    pub fn in_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.repo_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    #[cfg(test)]
    pub(crate) fn executor(&self) -> &G {
        &self.git
    }

    /// Options for commands that target the repository as a whole.
    pub(super) fn repo_options(&self) -> ExecOptions {
        match &self.repo_dir {
            Some(dir) => ExecOptions::in_dir(dir),
            None => ExecOptions::default(),
        }
    }

    /// List every worktree, with `branch_deleted` filled in.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Worktree>)` - Worktrees in git's listing order (main worktree first)
    /// * `Err(BoscaioloError::CommandFailed)` - Either git command failed (e.g. not a repository)
    pub fn list_worktrees(&self) -> Result<Vec<Worktree>> {
        let output = self
            .git
            .execute(&["worktree", "list", "--porcelain"], &self.repo_options())?;
        let parsed = parse_worktree_list(&output);

        let branches = self.list_branches()?;

        let worktrees: Vec<Worktree> = parsed
            .into_iter()
            .map(|wt| wt.with_branch_deleted(&branches))
            .collect();

        info!(
            event = "worktree.list_completed",
            count = worktrees.len(),
            branch_deleted = worktrees.iter().filter(|wt| wt.branch_deleted).count()
        );

        Ok(worktrees)
    }

    /// All local and remote-tracking branch names (`git branch -a`).
    pub fn list_branches(&self) -> Result<HashSet<String>> {
        let output = self.git.execute(&["branch", "-a"], &self.repo_options())?;
        let branches = parse_branch_list(&output);
        debug!(event = "worktree.branches_listed", count = branches.len());
        Ok(branches)
    }
}
