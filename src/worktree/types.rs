//! Worktree snapshot and removal result types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Lock record attached to a worktree by `git worktree lock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorktreeLock {
    /// Free-text reason given when locking, if any.
    pub reason: Option<String>,
}

/// One worktree as reported by a single `git worktree list --porcelain` call.
///
/// Values are snapshots: they are rebuilt on every listing and only the
/// derived fields are attached after parsing, through the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worktree {
    /// Absolute path to the worktree directory.
    pub path: PathBuf,
    /// Checked-out branch, `None` for a detached HEAD.
    pub branch: Option<String>,
    /// Full HEAD commit SHA.
    pub commit: String,
    /// Git reports the worktree directory as gone.
    pub is_prunable: bool,
    /// Lock record, if the worktree is locked.
    pub lock: Option<WorktreeLock>,
    /// First record of the listing, i.e. the main working tree.
    pub is_main: bool,
    /// Bare repository entry.
    pub is_bare: bool,
    /// The branch is set but no longer exists.
    pub branch_deleted: bool,
    /// Last access (or modification) time of the directory, set by staleness scans.
    pub last_accessed: Option<DateTime<Utc>>,
}

impl Worktree {
    /// Whether git holds a lock record for this worktree.
    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    /// Lock reason, only ever present on a locked worktree.
    pub fn lock_reason(&self) -> Option<&str> {
        self.lock.as_ref().and_then(|l| l.reason.as_deref())
    }

    /// Abbreviated commit for display.
    pub fn short_commit(&self) -> &str {
        let end = self.commit.len().min(7);
        &self.commit[..end]
    }

    /// Branch name, or `detached` when HEAD is detached.
    pub fn branch_label(&self) -> &str {
        self.branch.as_deref().unwrap_or("detached")
    }

    /// Flag the worktree whose branch is missing from `branches`.
    pub fn with_branch_deleted(mut self, branches: &HashSet<String>) -> Self {
        self.branch_deleted = self
            .branch
            .as_ref()
            .is_some_and(|branch| !branches.contains(branch));
        self
    }

    /// Attach the timestamp observed during a staleness scan.
    pub fn with_last_accessed(mut self, at: DateTime<Utc>) -> Self {
        self.last_accessed = Some(at);
        self
    }
}

/// A worktree that could not be removed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of one removal batch.
///
/// Both lists keep the order of the input batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupResult {
    /// Paths removed successfully.
    pub removed: Vec<PathBuf>,
    /// Worktrees that were locked or that git refused to remove.
    pub failed: Vec<RemovalFailure>,
}

impl CleanupResult {
    /// Total number of worktrees accounted for.
    pub fn total(&self) -> usize {
        self.removed.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Options for a removal batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Return an empty result without running any command.
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worktree(branch: Option<&str>) -> Worktree {
        Worktree {
            path: PathBuf::from("/repo/.worktrees/wt"),
            branch: branch.map(String::from),
            commit: "0123456789abcdef0123456789abcdef01234567".to_string(),
            is_prunable: false,
            lock: None,
            is_main: false,
            is_bare: false,
            branch_deleted: false,
            last_accessed: None,
        }
    }

    #[test]
    fn test_branch_deleted_when_missing_from_set() {
        let branches: HashSet<String> = ["main".to_string()].into_iter().collect();
        let wt = worktree(Some("feature-1")).with_branch_deleted(&branches);
        assert!(wt.branch_deleted);

        let wt = worktree(Some("main")).with_branch_deleted(&branches);
        assert!(!wt.branch_deleted);
    }

    #[test]
    fn test_detached_is_never_branch_deleted() {
        let wt = worktree(None).with_branch_deleted(&HashSet::new());
        assert!(!wt.branch_deleted);
        assert_eq!(wt.branch_label(), "detached");
    }

    #[test]
    fn test_lock_reason_requires_lock() {
        let mut wt = worktree(Some("a"));
        assert!(!wt.is_locked());
        assert_eq!(wt.lock_reason(), None);

        wt.lock = Some(WorktreeLock { reason: None });
        assert!(wt.is_locked());
        assert_eq!(wt.lock_reason(), None);

        wt.lock = Some(WorktreeLock {
            reason: Some("on usb drive".to_string()),
        });
        assert_eq!(wt.lock_reason(), Some("on usb drive"));
    }

    #[test]
    fn test_short_commit() {
        let mut wt = worktree(Some("a"));
        assert_eq!(wt.short_commit(), "0123456");
        wt.commit = "abc".to_string();
        assert_eq!(wt.short_commit(), "abc");
    }

    #[test]
    fn test_cleanup_result_total() {
        let result = CleanupResult {
            removed: vec![PathBuf::from("/a")],
            failed: vec![RemovalFailure {
                path: PathBuf::from("/b"),
                error: "Locked: no reason given".to_string(),
            }],
        };
        assert_eq!(result.total(), 2);
        assert!(result.has_failures());
        assert!(!CleanupResult::default().has_failures());
    }
}
