//! Git command executor for boscaiolo.
//!
//! Every interaction with the repository goes through a [`GitExecutor`]: one
//! child process per call, stdout captured and trimmed, non-zero exit turned
//! into [`BoscaioloError::CommandFailed`] unless the caller opts out.
//! Arguments are passed as a vector and never through a shell.

use crate::error::{BoscaioloError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, warn};

/// Options for a single git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOptions {
    /// Directory to run git in. `None` uses the process working directory.
    pub working_dir: Option<PathBuf>,
    /// When false, a failing command yields an empty string instead of an error.
    pub throw_on_error: bool,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            working_dir: None,
            throw_on_error: true,
        }
    }
}

impl ExecOptions {
    /// Run in `dir`, failing on non-zero exit.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            working_dir: Some(dir.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Swallow non-zero exit and return an empty string instead.
    pub fn allow_failure(mut self) -> Self {
        self.throw_on_error = false;
        self
    }
}

/// Runs git subcommands and returns their standard output.
pub trait GitExecutor {
    /// Run `git <args>` and return stdout with trailing whitespace removed.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Command exited 0, or failed with `throw_on_error == false` (empty)
    /// * `Err(BoscaioloError::CommandFailed)` - Non-zero exit with `throw_on_error == true`
    fn execute(&self, args: &[&str], options: &ExecOptions) -> Result<String>;

    /// Check whether `dir` is inside a git repository (`rev-parse --git-dir`).
    fn is_git_repository(&self, dir: &Path) -> bool {
        self.execute(&["rev-parse", "--git-dir"], &ExecOptions::in_dir(dir))
            .is_ok()
    }
}

impl<T: GitExecutor + ?Sized> GitExecutor for &T {
    fn execute(&self, args: &[&str], options: &ExecOptions) -> Result<String> {
        (**self).execute(args, options)
    }
}

/// Executor backed by the `git` binary on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl GitExecutor for SystemGit {
    fn execute(&self, args: &[&str], options: &ExecOptions) -> Result<String> {
        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &options.working_dir {
            command.current_dir(dir);
        }

        debug!(
            event = "git.command_started",
            args = %args.join(" "),
            cwd = ?options.working_dir
        );

        let message = match command.output() {
            Ok(output) if output.status.success() => {
                return Ok(trimmed(&output.stdout));
            }
            Ok(output) => failure_message(args, &output),
            Err(e) => format!("failed to execute git {}: {}", subcommand(args), e),
        };

        warn!(
            event = "git.command_failed",
            args = %args.join(" "),
            error = %message
        );

        if options.throw_on_error {
            Err(BoscaioloError::CommandFailed(message))
        } else {
            Ok(String::new())
        }
    }
}

/// Resolve the top-level directory of the working tree containing `dir`.
pub fn show_toplevel<G: GitExecutor>(git: &G, dir: &Path) -> Result<PathBuf> {
    let output = git.execute(&["rev-parse", "--show-toplevel"], &ExecOptions::in_dir(dir))?;
    Ok(PathBuf::from(output))
}

/// Reject values that git would read as an option or that carry control characters.
pub fn validate_git_arg(value: &str, label: &str) -> Result<()> {
    if value.is_empty() {
        return Err(BoscaioloError::UserError(format!("{} must not be empty", label)));
    }
    if value.starts_with('-') {
        return Err(BoscaioloError::UserError(format!(
            "invalid {}: '{}' (must not start with '-')",
            label, value
        )));
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(BoscaioloError::UserError(format!(
            "invalid {}: contains control characters",
            label
        )));
    }
    Ok(())
}

fn trimmed(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}

fn subcommand<'a>(args: &[&'a str]) -> &'a str {
    args.first().copied().unwrap_or("")
}

fn failure_message(args: &[&str], output: &Output) -> String {
    let exit_code = output.status.code().unwrap_or(-1);
    let stderr = trimmed(&output.stderr);
    let detail = if stderr.is_empty() {
        trimmed(&output.stdout)
    } else {
        stderr
    };

    format!(
        "git {} failed (exit code {}): {}",
        subcommand(args),
        exit_code,
        detail
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_repo;
    use tempfile::TempDir;

    #[test]
    fn test_execute_success() {
        let temp_dir = create_test_repo();
        let result = SystemGit.execute(&["status", "--porcelain"], &ExecOptions::in_dir(temp_dir.path()));
        assert_eq!(result.unwrap(), "");
    }

    #[test]
    fn test_execute_trims_trailing_newline() {
        let temp_dir = create_test_repo();
        let output = SystemGit
            .execute(
                &["rev-parse", "--abbrev-ref", "HEAD"],
                &ExecOptions::in_dir(temp_dir.path()),
            )
            .unwrap();
        assert_eq!(output, "main");
    }

    #[test]
    fn test_execute_failure_returns_command_failed() {
        let temp_dir = create_test_repo();
        let err = SystemGit
            .execute(
                &["checkout", "nonexistent-branch"],
                &ExecOptions::in_dir(temp_dir.path()),
            )
            .unwrap_err();
        assert!(matches!(err, BoscaioloError::CommandFailed(_)));
        assert!(err.to_string().contains("git checkout failed"));
    }

    #[test]
    fn test_execute_failure_suppressed_returns_empty() {
        let temp_dir = create_test_repo();
        let output = SystemGit
            .execute(
                &["checkout", "nonexistent-branch"],
                &ExecOptions::in_dir(temp_dir.path()).allow_failure(),
            )
            .unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_missing_working_dir_is_a_failure() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");
        let err = SystemGit
            .execute(&["status"], &ExecOptions::in_dir(&missing))
            .unwrap_err();
        assert!(matches!(err, BoscaioloError::CommandFailed(_)));
    }

    #[test]
    fn test_is_git_repository() {
        let repo = create_test_repo();
        assert!(SystemGit.is_git_repository(repo.path()));

        let plain = TempDir::new().unwrap();
        assert!(!SystemGit.is_git_repository(plain.path()));
    }

    #[test]
    fn test_show_toplevel_from_subdirectory() {
        let temp_dir = create_test_repo();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let root = show_toplevel(&SystemGit, &nested).unwrap();
        assert_eq!(
            root.canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_validate_git_arg() {
        assert!(validate_git_arg("main", "base branch").is_ok());
        assert!(validate_git_arg("feature/login", "base branch").is_ok());
        assert!(validate_git_arg("", "base branch").is_err());
        assert!(validate_git_arg("--force", "base branch").is_err());
        assert!(validate_git_arg("main\nx", "base branch").is_err());
    }

    #[test]
    fn test_exec_options_defaults() {
        let options = ExecOptions::default();
        assert!(options.throw_on_error);
        assert!(options.working_dir.is_none());

        let options = ExecOptions::in_dir("/tmp").allow_failure();
        assert!(!options.throw_on_error);
        assert_eq!(options.working_dir, Some(PathBuf::from("/tmp")));
    }
}
