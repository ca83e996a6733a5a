//! Worktree discovery, classification and removal.
//!
//! - Listing worktrees (`git worktree list --porcelain`) and flagging those
//!   whose branch is gone (`git branch -a`)
//! - Cohorts: deleted branch, stale directory, merged into a base branch
//! - Removing a batch with per-worktree success/failure accounting
//!
//! Listing and classification failures propagate as errors. Removal never
//! fails as a whole; each worktree ends up in `removed` or `failed`.

mod classify;
mod cleanup;
mod manager;
mod parser;
mod types;

// Re-export public API
pub use classify::AccessProbe;
pub use cleanup::{DirtyState, RemovalOutcome};
pub use manager::WorktreeManager;
pub use parser::parse_worktree_list;
pub use types::{CleanupOptions, CleanupResult, RemovalFailure, Worktree, WorktreeLock};
