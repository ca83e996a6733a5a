use crate::error::{BoscaioloError, Result};
use crate::git::{ExecOptions, GitExecutor};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A repository on `main` with one commit.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    // Worktrees need at least one commit.
    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

/// Add `<repo>/.worktrees/<branch>` on a new branch and return its path.
pub(crate) fn add_worktree(repo_dir: &Path, branch: &str) -> PathBuf {
    let worktree_path = repo_dir.join(".worktrees").join(branch);
    git(
        repo_dir,
        &[
            "worktree",
            "add",
            "-b",
            branch,
            &worktree_path.to_string_lossy(),
        ],
    );
    worktree_path
}

/// Write `file` in `dir` and commit it.
pub(crate) fn commit_file(dir: &Path, file: &str, contents: &str) {
    std::fs::write(dir.join(file), contents).unwrap();
    git(dir, &["add", file]);
    git(dir, &["commit", "-m", &format!("Add {}", file)]);
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}

/// One invocation seen by [`ScriptedGit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub args: String,
    pub working_dir: Option<PathBuf>,
}

type ScriptKey = (String, Option<PathBuf>);

/// Fake executor answering from a script and recording every call.
///
/// Responses are keyed by the space-joined arguments, optionally scoped to a
/// working directory. Unscripted commands fail like a non-zero git exit.
#[derive(Debug, Default)]
pub(crate) struct ScriptedGit {
    responses: HashMap<ScriptKey, std::result::Result<String, String>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedGit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, args: &str, stdout: &str) -> Self {
        self.responses
            .insert((args.to_string(), None), Ok(stdout.to_string()));
        self
    }

    pub(crate) fn respond_in(mut self, dir: &str, args: &str, stdout: &str) -> Self {
        self.responses.insert(
            (args.to_string(), Some(PathBuf::from(dir))),
            Ok(stdout.to_string()),
        );
        self
    }

    pub(crate) fn fail(mut self, args: &str, message: &str) -> Self {
        self.responses
            .insert((args.to_string(), None), Err(message.to_string()));
        self
    }

    pub(crate) fn fail_in(mut self, dir: &str, args: &str, message: &str) -> Self {
        self.responses.insert(
            (args.to_string(), Some(PathBuf::from(dir))),
            Err(message.to_string()),
        );
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl GitExecutor for ScriptedGit {
    fn execute(&self, args: &[&str], options: &ExecOptions) -> Result<String> {
        let key = args.join(" ");
        self.calls.borrow_mut().push(RecordedCall {
            args: key.clone(),
            working_dir: options.working_dir.clone(),
        });

        let scoped = (key.clone(), options.working_dir.clone());
        let response = self
            .responses
            .get(&scoped)
            .or_else(|| self.responses.get(&(key.clone(), None)));

        let message = match response {
            Some(Ok(stdout)) => return Ok(stdout.clone()),
            Some(Err(message)) => format!("git {} failed (exit code 128): {}", args[0], message),
            None => format!("unexpected command: git {}", key),
        };

        if options.throw_on_error {
            Err(BoscaioloError::CommandFailed(message))
        } else {
            Ok(String::new())
        }
    }
}
