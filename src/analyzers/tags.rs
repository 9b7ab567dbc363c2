// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Implementation of the `tags` analyzer: check markup tag pairing and
//! cross-locale tag consistency.

use colored::Color;

use crate::analyze::{Analysis, EntryContext};
use crate::analyzers::analyzer::EntryAnalyzer;
use crate::diagnostic::Severity;
use crate::inline::run::{Run, RunSequence, Weight};
use crate::tags::list::TagsList;

const BAD_TAG_COLOR: Color = Color::BrightYellow;
const BAD_TAG_ON_COLOR: Color = Color::Red;

pub struct TagsAnalyzer;

impl EntryAnalyzer for TagsAnalyzer {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Check markup tags of the entry.
    ///
    /// Two checks are performed:
    ///
    /// - pairing: tags whose name requires closing must be opened and closed
    ///   in order (`{b}bold{/b}`); closers without an opener, openers without
    ///   a closer and closers for names that take no closing are reported
    /// - consistency: when the paired source locale text is available, every
    ///   opening tag must appear byte-identical on both sides (subtags
    ///   included), except the names configured as ignored
    ///
    /// Diagnostics reported with severity [`error`](Severity::Error):
    /// - `unpaired or misordered tags (#)`
    /// - `inconsistent markup tags`
    ///
    /// The returned runs highlight every flagged tag.
    fn annotate(&self, analysis: &mut Analysis, entry: &EntryContext) -> Option<RunSequence> {
        let config = &analysis.config.tags;
        let mut list = TagsList::parse(entry.text, config);
        let bad_pairs: Vec<(usize, usize)> = list
            .wrong_open_close()
            .map(|tag| (tag.start, tag.end))
            .collect();
        if !bad_pairs.is_empty() {
            analysis.report_text(
                format!("unpaired or misordered tags ({})", bad_pairs.len()),
                entry.locale,
                entry.text,
                &bad_pairs,
            );
        }
        if let (Some(source_locale), Some(source_text)) = (entry.source_locale, entry.source_text)
        {
            let mut source_list = TagsList::parse(source_text, config);
            if !TagsList::compare(&mut source_list, &mut list, config) {
                let hl_source: Vec<(usize, usize)> = source_list
                    .unmatched()
                    .map(|tag| (tag.start, tag.end))
                    .collect();
                let hl_target: Vec<(usize, usize)> =
                    list.unmatched().map(|tag| (tag.start, tag.end)).collect();
                analysis.report_msg(
                    "inconsistent markup tags".to_string(),
                    source_locale,
                    source_text,
                    &hl_source,
                    entry.locale,
                    entry.text,
                    &hl_target,
                );
            }
        }
        let mut runs = RunSequence::new();
        let mut pos = 0;
        for tag in &list.tags {
            if !(tag.wrong_open_close || tag.unmatched) || tag.start < pos {
                continue;
            }
            runs.push(Run::new(&entry.text[pos..tag.start]));
            runs.push(
                Run::new(&entry.text[tag.start..tag.end])
                    .with_fg(BAD_TAG_COLOR)
                    .with_bg(BAD_TAG_ON_COLOR)
                    .with_weight(Weight::Bold),
            );
            pos = tag.end;
        }
        runs.push(Run::new(&entry.text[pos..]));
        Some(runs)
    }
}
