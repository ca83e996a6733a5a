//! Command implementations for boscaiolo.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command writes user-facing output to the writer it
//! is given and returns the process exit code.

mod cleanup;
mod display;
mod interactive;
mod list;

use crate::cli::Command;
use crate::config::Config;
use crate::context::RepoContext;
use crate::error::Result;
use crate::git::{GitExecutor, SystemGit};
use crate::worktree::{Worktree, WorktreeManager};
use std::io::{self, Write};
use std::path::PathBuf;

/// Everything a command needs about the repository it runs in.
pub(crate) struct Session<G: GitExecutor = SystemGit> {
    pub manager: WorktreeManager<G>,
    pub config: Config,
    pub repo_root: PathBuf,
}

impl<G: GitExecutor> Session<G> {
    /// Drop the main worktree when the config protects it.
    pub fn removable(&self, worktrees: Vec<Worktree>) -> Vec<Worktree> {
        if !self.config.protect_main_worktree {
            return worktrees;
        }
        worktrees.into_iter().filter(|wt| !wt.is_main).collect()
    }
}

/// Resolve the repository and config for the current directory.
fn open_session() -> Result<Session> {
    let ctx = RepoContext::resolve(&SystemGit)?;
    let config = Config::load_or_default(ctx.config_path())?;
    let manager = WorktreeManager::new().in_dir(&ctx.repo_root);

    Ok(Session {
        manager,
        config,
        repo_root: ctx.repo_root,
    })
}

/// Dispatch a command to its implementation.
///
/// Returns the exit code for a command that ran to completion; errors are
/// left to the caller to report.
pub fn dispatch(command: Command) -> Result<i32> {
    let session = open_session()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let code = match command {
        Command::List(args) => list::cmd_list(&session, &args, &mut out)?,
        Command::Stale(args) => cleanup::cmd_stale(&session, &args, &mut out)?,
        Command::Deleted(args) => cleanup::cmd_deleted(&session, &args, &mut out)?,
        Command::Merged(args) => cleanup::cmd_merged(&session, &args, &mut out)?,
        Command::Interactive(args) => {
            let stdin = io::stdin();
            interactive::cmd_interactive(&session, &args, &mut stdin.lock(), &mut out)?
        }
    };

    out.flush()?;
    Ok(code)
}
