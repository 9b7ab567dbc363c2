// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Word-level diff between two versions of a localized string.
//!
//! Both strings are tokenized with the markup-aware scanner (words,
//! separators and tags are each one token), aligned with a longest common
//! subsequence, and emitted as styled runs: old-only tokens are struck
//! through, new-only tokens are inserted, unchanged tokens stay plain. The
//! reconstructed output interleaves both versions, so its length generally
//! matches neither input: merging it against a single-version sequence takes
//! the length-mismatch fallback.

use colored::Color;

use crate::inline::run::{Kind, Run, RunSequence};
use crate::tags::scan::Tokens;

/// Maximum token count per side before skipping the LCS table.
const MAX_DIFF_TOKENS: usize = 500;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Op {
    Equal,
    Delete,
    Insert,
}

/// Compute the word-level diff of two strings as a styled run sequence.
///
/// Deleted spans carry [`Kind::DiffDelete`], inserted spans
/// [`Kind::DiffInsert`], unchanged spans [`Kind::Default`].
#[must_use]
pub fn make_inlines(old_text: &str, new_text: &str) -> RunSequence {
    let old_tokens: Vec<&str> = Tokens::new(old_text).map(|t| t.text).collect();
    let new_tokens: Vec<&str> = Tokens::new(new_text).map(|t| t.text).collect();
    let ops = if old_tokens.len() > MAX_DIFF_TOKENS || new_tokens.len() > MAX_DIFF_TOKENS {
        // Too large for the O(n*m) table: everything changed.
        let mut ops = vec![Op::Delete; old_tokens.len()];
        ops.extend(std::iter::repeat_n(Op::Insert, new_tokens.len()));
        ops
    } else {
        backtrack(&old_tokens, &new_tokens)
    };
    build_runs(&ops, &old_tokens, &new_tokens)
}

/// Compute the LCS length table for two token slices.
fn lcs_table(a: &[&str], b: &[&str]) -> Vec<Vec<usize>> {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table
}

/// Backtrack the LCS table into an ordered list of edit operations.
fn backtrack(a: &[&str], b: &[&str]) -> Vec<Op> {
    let table = lcs_table(a, b);
    let mut ops = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (a.len(), b.len());
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            ops.push(Op::Equal);
            i -= 1;
            j -= 1;
        } else if table[i][j - 1] >= table[i - 1][j] {
            // Built in reverse: pushing inserts first puts deletions before
            // insertions in the final order.
            ops.push(Op::Insert);
            j -= 1;
        } else {
            ops.push(Op::Delete);
            i -= 1;
        }
    }
    ops.resize(ops.len() + i, Op::Delete);
    ops.resize(ops.len() + j, Op::Insert);
    ops.reverse();
    ops
}

/// Turn the operation list back into runs, grouping consecutive tokens with
/// the same operation into a single run.
fn build_runs(ops: &[Op], old_tokens: &[&str], new_tokens: &[&str]) -> RunSequence {
    let mut sequence = RunSequence::new();
    let (mut oi, mut ni) = (0, 0);
    let mut text = String::new();
    let mut current = Op::Equal;
    for &op in ops {
        if op != current {
            sequence.push(styled(&text, current));
            text.clear();
            current = op;
        }
        match op {
            Op::Equal => {
                text.push_str(new_tokens[ni]);
                oi += 1;
                ni += 1;
            }
            Op::Delete => {
                text.push_str(old_tokens[oi]);
                oi += 1;
            }
            Op::Insert => {
                text.push_str(new_tokens[ni]);
                ni += 1;
            }
        }
    }
    sequence.push(styled(&text, current));
    sequence
}

fn styled(text: &str, op: Op) -> Run {
    match op {
        Op::Equal => Run::new(text),
        Op::Delete => Run::new(text)
            .with_fg(Color::Red)
            .with_strikethrough()
            .with_kind(Kind::DiffDelete),
        Op::Insert => Run::new(text)
            .with_fg(Color::Green)
            .with_kind(Kind::DiffInsert),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(sequence: &RunSequence) -> Vec<(Kind, String)> {
        sequence
            .runs()
            .iter()
            .map(|run| (run.kind, run.text().to_string()))
            .collect()
    }

    #[test]
    fn test_identical() {
        let diff = make_inlines("Hello world", "Hello world");
        assert_eq!(
            kinds(&diff),
            vec![(Kind::Default, "Hello world".to_string())]
        );
    }

    #[test]
    fn test_insert_word() {
        let diff = make_inlines("Hello world", "Hello there world");
        assert_eq!(
            kinds(&diff),
            vec![
                (Kind::Default, "Hello".to_string()),
                (Kind::DiffInsert, " there".to_string()),
                (Kind::Default, " world".to_string()),
            ]
        );
        assert_eq!(diff.to_string(), "Hello there world");
    }

    #[test]
    fn test_delete_word() {
        let diff = make_inlines("Hello there world", "Hello world");
        assert_eq!(
            kinds(&diff),
            vec![
                (Kind::Default, "Hello".to_string()),
                (Kind::DiffDelete, " there".to_string()),
                (Kind::Default, " world".to_string()),
            ]
        );
        assert_eq!(diff.to_string(), "Hello there world");
    }

    #[test]
    fn test_replace_word() {
        let diff = make_inlines("a big cat", "a small cat");
        assert_eq!(
            kinds(&diff),
            vec![
                (Kind::Default, "a ".to_string()),
                (Kind::DiffDelete, "big".to_string()),
                (Kind::DiffInsert, "small".to_string()),
                (Kind::Default, " cat".to_string()),
            ]
        );
    }

    #[test]
    fn test_all_changed() {
        let diff = make_inlines("one", "two");
        assert_eq!(
            kinds(&diff),
            vec![
                (Kind::DiffDelete, "one".to_string()),
                (Kind::DiffInsert, "two".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_empty() {
        let diff = make_inlines("", "new text");
        assert_eq!(kinds(&diff), vec![(Kind::DiffInsert, "new text".to_string())]);
        let diff = make_inlines("old text", "");
        assert_eq!(kinds(&diff), vec![(Kind::DiffDelete, "old text".to_string())]);
    }

    #[test]
    fn test_tag_is_one_token() {
        let diff = make_inlines("Hi {g|a|b}!", "Hi {g|x|y}!");
        assert_eq!(
            kinds(&diff),
            vec![
                (Kind::Default, "Hi ".to_string()),
                (Kind::DiffDelete, "{g|a|b}".to_string()),
                (Kind::DiffInsert, "{g|x|y}".to_string()),
                (Kind::Default, "!".to_string()),
            ]
        );
    }

    #[test]
    fn test_delete_style() {
        let diff = make_inlines("gone", "");
        let run = &diff.runs()[0];
        assert!(run.strikethrough);
        assert_eq!(run.fg, Some(Color::Red));
    }

    #[test]
    fn test_interleaved_reconstruction() {
        // Output carries both versions: old-only and new-only spans together.
        let diff = make_inlines("the quick fox", "the lazy fox");
        assert_eq!(diff.to_string(), "the quicklazy fox");
    }
}
