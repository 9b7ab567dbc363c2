// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Implementation of the `diff` analyzer: compare entries against a baseline
//! version of the database.

use crate::analyze::{Analysis, EntryContext};
use crate::analyzers::analyzer::EntryAnalyzer;
use crate::diagnostic::Severity;
use crate::inline::diff::make_inlines;
use crate::inline::run::{Kind, RunSequence};

pub struct DiffAnalyzer;

/// Label shown in the diagnostic gutter for the baseline text.
const BASELINE_LABEL: &str = "old";

impl EntryAnalyzer for DiffAnalyzer {
    fn name(&self) -> &'static str {
        "diff"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    /// Check if the entry changed since the baseline version.
    ///
    /// The word-level diff is reported as a diagnostic highlighting removed
    /// spans in the baseline text and inserted spans in the current text.
    ///
    /// The diff runs are also returned into the annotation pipeline; their
    /// reconstructed text interleaves both versions, so whenever the diff
    /// contains deletions the merge against the accumulated single-version
    /// sequence takes the length-mismatch fallback and keeps the
    /// accumulated runs.
    ///
    /// Diagnostics reported with severity [`info`](Severity::Info):
    /// - `text changed since baseline`
    fn annotate(&self, analysis: &mut Analysis, entry: &EntryContext) -> Option<RunSequence> {
        let baseline = entry.baseline_text?;
        if baseline == entry.text {
            return None;
        }
        let runs = make_inlines(baseline, entry.text);
        let (hl_old, hl_new) = diff_spans(&runs);
        analysis.report_msg(
            "text changed since baseline".to_string(),
            BASELINE_LABEL,
            baseline,
            &hl_old,
            entry.locale,
            entry.text,
            &hl_new,
        );
        Some(runs)
    }
}

/// Map diff runs back to byte spans: deleted spans in the old text and
/// inserted spans in the new text.
fn diff_spans(runs: &RunSequence) -> (Vec<(usize, usize)>, Vec<(usize, usize)>) {
    let mut hl_old = Vec::new();
    let mut hl_new = Vec::new();
    let (mut old_pos, mut new_pos) = (0, 0);
    for run in runs.runs() {
        let len = run.text().len();
        match run.kind {
            Kind::DiffDelete => {
                hl_old.push((old_pos, old_pos + len));
                old_pos += len;
            }
            Kind::DiffInsert => {
                hl_new.push((new_pos, new_pos + len));
                new_pos += len;
            }
            _ => {
                old_pos += len;
                new_pos += len;
            }
        }
    }
    (hl_old, hl_new)
}
