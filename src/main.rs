//! Boscaiolo: find and remove git worktrees that are no longer needed.
//!
//! This is the main entry point for the `boscaiolo` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod logging;
pub mod worktree;

#[cfg(test)]
mod test_support;

use cli::Cli;
use logging::{Verbosity, init_logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    init_logging(Verbosity::from_flags(cli.quiet, cli.command.verbose()));

    match commands::dispatch(cli.command) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
