//! Exit code constants for the boscaiolo CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, not a repository)
//! - 2: Git command failure while scanning
//! - 3: Partial failure (some worktrees could not be removed)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or not inside a repository.
pub const USER_ERROR: i32 = 1;

/// Git failure: listing or classification could not run.
pub const GIT_FAILURE: i32 = 2;

/// At least one worktree in a removal batch failed.
pub const PARTIAL_FAILURE: i32 = 3;
