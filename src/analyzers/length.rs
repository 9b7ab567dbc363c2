// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Implementation of the `length` analyzer: check text against the character
//! limit of its string kind.

use colored::Color;

use crate::analyze::{Analysis, EntryContext};
use crate::analyzers::analyzer::EntryAnalyzer;
use crate::diagnostic::Severity;
use crate::inline::run::{Kind, Run, RunSequence};

const OVERFLOW_ON_COLOR: Color = Color::Red;

pub struct LengthAnalyzer;

impl EntryAnalyzer for LengthAnalyzer {
    fn name(&self) -> &'static str {
        "length"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    /// Check the text against the character limit configured for its kind.
    ///
    /// Limits count UTF-8 characters, not bytes. Entries whose kind has no
    /// configured limit are not checked.
    ///
    /// Diagnostics reported with severity [`warning`](Severity::Warning):
    /// - `text too long (# / #)`
    ///
    /// The returned runs highlight the overflowing part of the text.
    fn annotate(&self, analysis: &mut Analysis, entry: &EntryContext) -> Option<RunSequence> {
        let limit = analysis.config.limit_for(entry.kind)?;
        if limit == 0 {
            return None;
        }
        let count = entry.text.chars().count();
        if count <= limit {
            return None;
        }
        let cut = entry
            .text
            .char_indices()
            .nth(limit)
            .map(|(offset, _)| offset)?;
        analysis.report_text(
            format!("text too long ({count} / {limit})"),
            entry.locale,
            entry.text,
            &[(cut, entry.text.len())],
        );
        let mut runs = RunSequence::new();
        runs.push(Run::new(&entry.text[..cut]));
        runs.push(
            Run::new(&entry.text[cut..])
                .with_bg(OVERFLOW_ON_COLOR)
                .with_kind(Kind::MaxLength),
        );
        Some(runs)
    }
}
