//! Repository context resolution for boscaiolo.
//!
//! Finds the repository from the working directory and the main worktree
//! root, where the optional config file lives. Works the same when invoked
//! from inside a linked worktree.

use crate::config::CONFIG_FILE_NAME;
use crate::error::{BoscaioloError, Result};
use crate::git::{ExecOptions, GitExecutor, show_toplevel};
use crate::worktree::parse_worktree_list;
use std::env;
use std::path::{Path, PathBuf};

/// Resolved paths for one invocation. All paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    /// Path to the main worktree (original clone location).
    pub repo_root: PathBuf,
}

impl RepoContext {
    /// Resolve the context from the process working directory.
    pub fn resolve<G: GitExecutor>(git: &G) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            BoscaioloError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(git, &cwd)
    }

    /// Resolve the context from a specific directory.
    ///
    /// # Returns
    ///
    /// * `Ok(RepoContext)` - Successfully resolved context
    /// * `Err(BoscaioloError::UserError)` - `cwd` is not inside a git repository
    pub fn resolve_from<G: GitExecutor>(git: &G, cwd: &Path) -> Result<Self> {
        if !git.is_git_repository(cwd) {
            return Err(BoscaioloError::UserError(
                "not inside a git repository. Run this command from within a git repository."
                    .to_string(),
            ));
        }

        let repo_root = Self::find_main_worktree(git, cwd)?;
        Ok(Self { repo_root })
    }

    /// The main worktree is always the first porcelain record.
    fn find_main_worktree<G: GitExecutor>(git: &G, cwd: &Path) -> Result<PathBuf> {
        let output = git.execute(&["worktree", "list", "--porcelain"], &ExecOptions::in_dir(cwd))?;
        match parse_worktree_list(&output).into_iter().find(|wt| wt.is_main) {
            Some(main) if !main.is_bare => Ok(main.path),
            _ => show_toplevel(git, cwd),
        }
    }

    /// Path to the optional config file.
    pub fn config_path(&self) -> PathBuf {
        self.repo_root.join(CONFIG_FILE_NAME)
    }
}
