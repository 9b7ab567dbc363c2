// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Implementation of the `filter` analyzer: highlight occurrences of the
//! search term given on the command line.

use colored::Color;

use crate::analyze::{Analysis, EntryContext};
use crate::analyzers::analyzer::EntryAnalyzer;
use crate::diagnostic::Severity;
use crate::inline::run::{Run, RunSequence};

const FILTER_ON_COLOR: Color = Color::Yellow;

pub struct FilterAnalyzer;

impl EntryAnalyzer for FilterAnalyzer {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    /// Highlight all case-insensitive occurrences of the filter term.
    ///
    /// This analyzer reports no diagnostic: it only contributes background
    /// highlighting to the merged annotation (the annotation kind stays
    /// `Default`).
    fn annotate(&self, analysis: &mut Analysis, entry: &EntryContext) -> Option<RunSequence> {
        let term = analysis.filter?;
        if term.is_empty() {
            return None;
        }
        let spans = find_ci_spans(entry.text, term);
        if spans.is_empty() {
            return None;
        }
        let mut runs = RunSequence::new();
        let mut pos = 0;
        for (start, end) in spans {
            runs.push(Run::new(&entry.text[pos..start]));
            runs.push(Run::new(&entry.text[start..end]).with_bg(FILTER_ON_COLOR));
            pos = end;
        }
        runs.push(Run::new(&entry.text[pos..]));
        Some(runs)
    }
}

/// Byte spans of all case-insensitive, non-overlapping occurrences of `term`.
fn find_ci_spans(text: &str, term: &str) -> Vec<(usize, usize)> {
    let term_chars: Vec<char> = term.chars().collect();
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut idx = 0;
    while idx + term_chars.len() <= chars.len() {
        let matched = term_chars
            .iter()
            .enumerate()
            .all(|(k, &c)| chars_eq_ci(chars[idx + k].1, c));
        if matched {
            let start = chars[idx].0;
            let end = chars
                .get(idx + term_chars.len())
                .map_or(text.len(), |(offset, _)| *offset);
            spans.push((start, end));
            idx += term_chars.len();
        } else {
            idx += 1;
        }
    }
    spans
}

fn chars_eq_ci(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::analyzer::Analyzers;
    use crate::config::Config;

    fn check(filter: Option<&str>, text: &str) -> (Vec<crate::diagnostic::Diagnostic>, RunSequence) {
        let config = Config::default();
        let analyzers = Analyzers::new(vec![Box::new(FilterAnalyzer {})]);
        let mut analysis = Analysis::new(&config).with_filter(filter);
        let entry = EntryContext {
            key: "key",
            locale: "en",
            text,
            kind: None,
            source_locale: None,
            source_text: None,
            baseline_text: None,
        };
        let merged = analysis.annotate_entry(&analyzers, &entry);
        (analysis.diagnostics, merged)
    }

    #[test]
    fn test_no_filter() {
        let (diags, merged) = check(None, "some text");
        assert!(diags.is_empty());
        assert_eq!(merged.runs().len(), 1);
    }

    #[test]
    fn test_filter_highlights() {
        let (diags, merged) = check(Some("sword"), "a Sword, a shield and a sword");
        assert!(diags.is_empty());
        let highlighted: Vec<&str> = merged
            .runs()
            .iter()
            .filter(|run| run.bg == Some(FILTER_ON_COLOR))
            .map(Run::text)
            .collect();
        assert_eq!(highlighted, vec!["Sword", "sword"]);
        assert_eq!(merged.to_string(), "a Sword, a shield and a sword");
    }

    #[test]
    fn test_find_ci_spans() {
        assert_eq!(find_ci_spans("abcABC", "abc"), vec![(0, 3), (3, 6)]);
        assert_eq!(find_ci_spans("no match", "xyz"), Vec::<(usize, usize)>::new());
        // Unicode case folding.
        assert_eq!(find_ci_spans("Kätzchen", "KÄTZ"), vec![(0, 5)]);
    }
}
