//! Implementation of the `boscaiolo interactive` command.
//!
//! Prints a numbered list of removable worktrees and reads one selection line:
//! - `1 3 5` (spaces or commas) picks single entries
//! - `2-4` picks an inclusive range
//! - `all` picks everything
//! - an empty line, `q` or end of input cancels
//!
//! The selection line is the confirmation; no `--yes` is needed.

use super::Session;
use super::display::{format_row, write_cleanup_result};
use crate::cli::InteractiveArgs;
use crate::error::{BoscaioloError, Result};
use crate::exit_codes;
use crate::git::GitExecutor;
use crate::worktree::{CleanupOptions, Worktree};
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use tracing::info;

/// What the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Selection {
    Cancel,
    /// Zero-based indices, ascending and without duplicates.
    Indices(Vec<usize>),
}

/// Parse a selection line against a list of `count` entries (numbered from 1).
pub(crate) fn parse_selection(input: &str, count: usize) -> Result<Selection> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("q") {
        return Ok(Selection::Cancel);
    }
    if input.eq_ignore_ascii_case("all") {
        return Ok(Selection::Indices((0..count).collect()));
    }

    let mut picked = BTreeSet::new();
    for token in input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        let (start, end) = match token.split_once('-') {
            Some((start, end)) => (parse_number(start, count)?, parse_number(end, count)?),
            None => {
                let n = parse_number(token, count)?;
                (n, n)
            }
        };
        if start > end {
            return Err(BoscaioloError::UserError(format!(
                "invalid range '{}': start is after end",
                token
            )));
        }
        picked.extend(start - 1..end);
    }

    Ok(Selection::Indices(picked.into_iter().collect()))
}

fn parse_number(token: &str, count: usize) -> Result<usize> {
    let n: usize = token
        .trim()
        .parse()
        .map_err(|_| BoscaioloError::UserError(format!("invalid selection '{}'", token)))?;
    if n == 0 || n > count {
        return Err(BoscaioloError::UserError(format!(
            "selection {} is out of range (1-{})",
            n, count
        )));
    }
    Ok(n)
}

/// Execute the `boscaiolo interactive` command.
pub(crate) fn cmd_interactive<G: GitExecutor, R: BufRead, W: Write>(
    session: &Session<G>,
    args: &InteractiveArgs,
    input: &mut R,
    out: &mut W,
) -> Result<i32> {
    let worktrees = session.removable(session.manager.list_worktrees()?);

    if worktrees.is_empty() {
        writeln!(out, "No worktrees found")?;
        return Ok(exit_codes::SUCCESS);
    }

    writeln!(out, "Select worktrees to remove:")?;
    writeln!(out)?;
    for (i, wt) in worktrees.iter().enumerate() {
        writeln!(
            out,
            "{:>3}) {}{}",
            i + 1,
            format_row(wt, &session.repo_root, args.verbose),
            markers(wt)
        )?;
    }
    writeln!(out)?;
    write!(out, "Numbers (e.g. 1 3 5, 2-4, all; empty or q to cancel): ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let selected: Vec<Worktree> = match parse_selection(&line, worktrees.len())? {
        Selection::Cancel => Vec::new(),
        Selection::Indices(indices) => indices.into_iter().map(|i| worktrees[i].clone()).collect(),
    };
    writeln!(out)?;

    if selected.is_empty() {
        writeln!(out, "No worktrees selected")?;
        return Ok(exit_codes::SUCCESS);
    }

    info!(event = "interactive.selected", count = selected.len(), dry_run = args.dry_run);

    if args.dry_run {
        session
            .manager
            .remove_worktrees(&selected, CleanupOptions { dry_run: true });
        writeln!(out, "[DRY RUN] Would remove {} worktrees", selected.len())?;
        return Ok(exit_codes::SUCCESS);
    }

    let result = session
        .manager
        .remove_worktrees(&selected, CleanupOptions::default());
    write_cleanup_result(out, &result, &session.repo_root)?;

    if result.has_failures() {
        Ok(exit_codes::PARTIAL_FAILURE)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn markers(wt: &Worktree) -> String {
    let mut markers = String::new();
    if wt.branch_deleted {
        markers.push_str(" [deleted]");
    }
    if wt.is_prunable {
        markers.push_str(" [prunable]");
    }
    if wt.is_locked() {
        markers.push_str(" [locked]");
    }
    markers
}
