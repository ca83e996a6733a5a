//! CLI argument parsing for boscaiolo.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};

/// Boscaiolo: find and remove git worktrees that are no longer needed.
///
/// Worktrees are grouped into cohorts:
/// - deleted: the checked-out branch no longer exists
/// - stale: the directory has not been accessed for N days
/// - merged: the branch is merged into a base branch
#[derive(Parser, Debug)]
#[command(name = "boscaiolo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Only log errors to stderr.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for boscaiolo.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all worktrees of the current repository.
    ///
    /// Shows branch and path per worktree, followed by counts of deleted
    /// branches, prunable and locked worktrees.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Find worktrees whose directory has not been accessed recently.
    Stale(StaleArgs),

    /// Find worktrees whose branch has been deleted.
    ///
    /// Prunable worktrees (directory gone) are included unless disabled
    /// with `include_prunable: false` in the config file.
    Deleted(DeletedArgs),

    /// Find worktrees whose branch is merged into a base branch.
    Merged(MergedArgs),

    /// Pick worktrees to remove from a numbered list.
    #[command(alias = "i")]
    Interactive(InteractiveArgs),
}

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show commit and lock details.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the listing as JSON.
    #[arg(long, conflicts_with = "verbose")]
    pub json: bool,
}

/// Flags shared by every cleanup command.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct CleanupFlags {
    /// Show what would be removed without removing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Remove the worktrees found.
    #[arg(short, long)]
    pub yes: bool,

    /// Show extra detail per worktree and log each git invocation.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments for the `stale` command.
#[derive(Args, Debug)]
pub struct StaleArgs {
    /// Days without access before a worktree counts as stale.
    ///
    /// Defaults to `stale_days` from the config file (30).
    #[arg(short, long)]
    pub days: Option<u32>,

    #[command(flatten)]
    pub flags: CleanupFlags,
}

/// Arguments for the `deleted` command.
#[derive(Args, Debug)]
pub struct DeletedArgs {
    #[command(flatten)]
    pub flags: CleanupFlags,
}

/// Arguments for the `merged` command.
#[derive(Args, Debug)]
pub struct MergedArgs {
    /// Branch to check merges against.
    ///
    /// Defaults to `base_branch` from the config file (main).
    #[arg(short, long)]
    pub base: Option<String>,

    #[command(flatten)]
    pub flags: CleanupFlags,
}

/// Arguments for the `interactive` command.
#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Show what would be removed without removing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Show extra detail per worktree and log each git invocation.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Command {
    /// Whether the command asked for verbose output.
    pub fn verbose(&self) -> bool {
        match self {
            Command::List(args) => args.verbose,
            Command::Stale(args) => args.flags.verbose,
            Command::Deleted(args) => args.flags.verbose,
            Command::Merged(args) => args.flags.verbose,
            Command::Interactive(args) => args.verbose,
        }
    }
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_list() {
        let cli = Cli::try_parse_from(["boscaiolo", "list"]).unwrap();
        if let Command::List(args) = cli.command {
            assert!(!args.verbose);
            assert!(!args.json);
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn parse_list_alias_and_json() {
        let cli = Cli::try_parse_from(["boscaiolo", "ls", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::List(ListArgs { json: true, .. })));
    }

    #[test]
    fn parse_list_json_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["boscaiolo", "list", "--json", "--verbose"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_stale_defaults() {
        let cli = Cli::try_parse_from(["boscaiolo", "stale"]).unwrap();
        if let Command::Stale(args) = cli.command {
            assert_eq!(args.days, None);
            assert!(!args.flags.dry_run);
            assert!(!args.flags.yes);
        } else {
            panic!("Expected Stale command");
        }
    }

    #[test]
    fn parse_stale_with_flags() {
        let cli =
            Cli::try_parse_from(["boscaiolo", "stale", "--days", "0", "--dry-run", "-v"]).unwrap();
        if let Command::Stale(args) = cli.command {
            assert_eq!(args.days, Some(0));
            assert!(args.flags.dry_run);
            assert!(args.flags.verbose);
        } else {
            panic!("Expected Stale command");
        }
    }

    #[test]
    fn parse_stale_rejects_negative_days() {
        let result = Cli::try_parse_from(["boscaiolo", "stale", "--days", "-3"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_deleted_yes() {
        let cli = Cli::try_parse_from(["boscaiolo", "deleted", "-y"]).unwrap();
        if let Command::Deleted(args) = cli.command {
            assert!(args.flags.yes);
        } else {
            panic!("Expected Deleted command");
        }
    }

    #[test]
    fn parse_merged_with_base() {
        let cli = Cli::try_parse_from(["boscaiolo", "merged", "--base", "develop"]).unwrap();
        if let Command::Merged(args) = cli.command {
            assert_eq!(args.base.as_deref(), Some("develop"));
        } else {
            panic!("Expected Merged command");
        }
    }

    #[test]
    fn parse_interactive_alias() {
        let cli = Cli::try_parse_from(["boscaiolo", "i", "--dry-run"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Interactive(InteractiveArgs { dry_run: true, .. })
        ));
    }

    #[test]
    fn parse_global_quiet_after_subcommand() {
        let cli = Cli::try_parse_from(["boscaiolo", "deleted", "--quiet"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn command_verbose_reads_nested_flags() {
        let cli = Cli::try_parse_from(["boscaiolo", "merged", "--verbose"]).unwrap();
        assert!(cli.command.verbose());

        let cli = Cli::try_parse_from(["boscaiolo", "list"]).unwrap();
        assert!(!cli.command.verbose());
    }

    #[test]
    fn parse_unknown_command_fails() {
        assert!(Cli::try_parse_from(["boscaiolo", "prune-everything"]).is_err());
    }
}
