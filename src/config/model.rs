//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for boscaiolo.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Days without access after which a worktree is stale (`stale --days`).
    #[serde(default = "default_stale_days")]
    pub stale_days: u32,

    /// Branch that `merged` compares against (`merged --base`).
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    /// Whether `deleted` also offers worktrees git reports as prunable.
    #[serde(default = "default_true")]
    pub include_prunable: bool,

    /// Never offer the main worktree for removal.
    #[serde(default = "default_true")]
    pub protect_main_worktree: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stale_days: default_stale_days(),
            base_branch: default_base_branch(),
            include_prunable: default_true(),
            protect_main_worktree: default_true(),
        }
    }
}
