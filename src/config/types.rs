//! Configuration constants and defaults for boscaiolo.

/// Config file name, looked up in the main worktree root.
pub const CONFIG_FILE_NAME: &str = ".boscaiolo.yaml";

// Default value functions for serde
pub(crate) fn default_stale_days() -> u32 {
    30
}
pub(crate) fn default_base_branch() -> String {
    "main".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
