//! Configuration model for boscaiolo.
//!
//! This module defines the Config struct that represents `.boscaiolo.yaml` in
//! the main worktree root. The file is optional; unknown fields are ignored and
//! every field has a default. Command-line flags override config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::CONFIG_FILE_NAME;
