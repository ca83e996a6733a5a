//! Parsers for `git worktree list --porcelain` and `git branch` output.
//!
//! Porcelain output is a sequence of records separated by blank lines. Each
//! line is `<key>[ <value>]`; keys are dispatched through [`FIELD_SETTERS`],
//! and keys not in the table are ignored so newer git versions keep parsing.

use super::types::{Worktree, WorktreeLock};
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Current-branch (`*`) or checked-out-in-worktree (`+`) marker.
static BRANCH_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*+]\s+").expect("Invalid branch marker regex"));

const REF_HEADS_PREFIX: &str = "refs/heads/";
const REMOTES_PREFIX: &str = "remotes/";

/// Fields collected for the record currently being read.
#[derive(Debug, Default)]
struct RecordBuilder {
    path: Option<PathBuf>,
    commit: Option<String>,
    branch: Option<String>,
    prunable: bool,
    lock: Option<WorktreeLock>,
    bare: bool,
}

impl RecordBuilder {
    /// Build the worktree, or `None` if no `worktree` line was seen.
    fn finish(self, is_main: bool) -> Option<Worktree> {
        let path = self.path?;
        Some(Worktree {
            path,
            branch: self.branch,
            commit: self.commit.unwrap_or_default(),
            is_prunable: self.prunable,
            lock: self.lock,
            is_main,
            is_bare: self.bare,
            branch_deleted: false,
            last_accessed: None,
        })
    }
}

type FieldSetter = fn(&mut RecordBuilder, Option<&str>);

/// Porcelain key to field setter. The value is `None` when the line has no text after the key.
static FIELD_SETTERS: &[(&str, FieldSetter)] = &[
    ("worktree", set_path),
    ("HEAD", set_commit),
    ("branch", set_branch),
    ("detached", set_detached),
    ("bare", set_bare),
    ("prunable", set_prunable),
    ("locked", set_locked),
];

fn set_path(record: &mut RecordBuilder, value: Option<&str>) {
    record.path = value.map(PathBuf::from);
}

fn set_commit(record: &mut RecordBuilder, value: Option<&str>) {
    record.commit = value.map(String::from);
}

fn set_branch(record: &mut RecordBuilder, value: Option<&str>) {
    record.branch = value.map(strip_ref_namespace);
}

fn set_detached(record: &mut RecordBuilder, _value: Option<&str>) {
    record.branch = None;
}

fn set_bare(record: &mut RecordBuilder, _value: Option<&str>) {
    record.bare = true;
}

fn set_prunable(record: &mut RecordBuilder, _value: Option<&str>) {
    record.prunable = true;
}

fn set_locked(record: &mut RecordBuilder, value: Option<&str>) {
    record.lock = Some(WorktreeLock {
        reason: value.filter(|v| !v.is_empty()).map(String::from),
    });
}

/// Parse `git worktree list --porcelain` output into worktrees, in listing order.
///
/// A record is emitted at each blank line once a path has been seen, and once
/// more at end of input for a trailing record with no terminating blank line.
pub fn parse_worktree_list(output: &str) -> Vec<Worktree> {
    let mut worktrees = Vec::new();
    let mut current = RecordBuilder::default();

    for line in output.lines() {
        if line.is_empty() {
            emit(std::mem::take(&mut current), &mut worktrees);
            continue;
        }

        let (key, value) = match line.split_once(' ') {
            Some((key, value)) => (key, Some(value)),
            None => (line, None),
        };

        if let Some((_, setter)) = FIELD_SETTERS.iter().find(|(k, _)| *k == key) {
            setter(&mut current, value);
        }
    }

    emit(current, &mut worktrees);
    worktrees
}

fn emit(record: RecordBuilder, worktrees: &mut Vec<Worktree>) {
    let is_main = worktrees.is_empty();
    if let Some(worktree) = record.finish(is_main) {
        worktrees.push(worktree);
    }
}

/// Strip `refs/heads/` from a porcelain branch ref.
pub fn strip_ref_namespace(branch_ref: &str) -> String {
    branch_ref
        .strip_prefix(REF_HEADS_PREFIX)
        .unwrap_or(branch_ref)
        .to_string()
}

/// Parse `git branch -a` into the set of known branch names.
///
/// Markers are dropped and `remotes/` is stripped, so `remotes/origin/x`
/// becomes `origin/x`.
pub fn parse_branch_list(output: &str) -> HashSet<String> {
    output
        .lines()
        .map(strip_branch_marker)
        .map(|name| {
            name.strip_prefix(REMOTES_PREFIX)
                .map(String::from)
                .unwrap_or(name)
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Parse `git branch --merged <base>` output, leaving out `base` itself.
pub fn parse_merged_branches(output: &str, base_branch: &str) -> HashSet<String> {
    output
        .lines()
        .map(strip_branch_marker)
        .filter(|name| !name.is_empty() && name != base_branch)
        .collect()
}

fn strip_branch_marker(line: &str) -> String {
    BRANCH_MARKER.replace(line.trim(), "").into_owned()
}
