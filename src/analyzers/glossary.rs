// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Implementation of the `glossary` analyzer: check glossary term usage and
//! cross-locale term consistency.

use crate::analyze::{Analysis, EntryContext};
use crate::analyzers::analyzer::EntryAnalyzer;
use crate::diagnostic::Severity;
use crate::glossary::store::Glossary;
use crate::inline::run::RunSequence;

pub struct GlossaryAnalyzer;

impl EntryAnalyzer for GlossaryAnalyzer {
    fn name(&self) -> &'static str {
        "glossary"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    /// Check glossary terms of the entry.
    ///
    /// Term occurrences come from the glossary cache (computed on first
    /// access). Case errors are reported per occurrence; when the paired
    /// source locale text is available, terms used on one side only are
    /// reported in both directions.
    ///
    /// Diagnostics reported with severity [`warning`](Severity::Warning):
    /// - `glossary term '…' with wrong case`
    /// - `glossary term '…' not used in …`
    /// - `glossary term '…' has no counterpart in …`
    ///
    /// The returned runs highlight every term occurrence.
    fn annotate(&self, analysis: &mut Analysis, entry: &EntryContext) -> Option<RunSequence> {
        let glossary = analysis.glossary?;
        if glossary.is_empty() {
            return None;
        }
        let runs = glossary.make_inlines(entry.text, entry.key, entry.locale);
        let terms = glossary.terms_for(entry.key, entry.locale, entry.text);
        for term in terms.iter().filter(|term| term.case_error) {
            analysis.report_text(
                format!("glossary term '{}' with wrong case", term.term_id),
                entry.locale,
                entry.text,
                &[(term.start, term.end)],
            );
        }
        if let (Some(source_locale), Some(source_text)) = (entry.source_locale, entry.source_text)
        {
            for term_id in
                glossary.missing_term_ids(entry.key, source_locale, source_text, entry.locale, entry.text)
            {
                let hl_source = term_spans(glossary, entry.key, source_locale, source_text, &term_id);
                analysis.report_msg(
                    format!("glossary term '{term_id}' not used in {}", entry.locale),
                    source_locale,
                    source_text,
                    &hl_source,
                    entry.locale,
                    entry.text,
                    &[],
                );
            }
            for term_id in
                glossary.missing_term_ids(entry.key, entry.locale, entry.text, source_locale, source_text)
            {
                let hl_target = term_spans(glossary, entry.key, entry.locale, entry.text, &term_id);
                analysis.report_msg(
                    format!("glossary term '{term_id}' has no counterpart in {source_locale}"),
                    source_locale,
                    source_text,
                    &[],
                    entry.locale,
                    entry.text,
                    &hl_target,
                );
            }
        }
        Some(runs)
    }
}

/// Byte spans of one term's occurrences in a locale entry (cached lookup).
fn term_spans(
    glossary: &Glossary,
    key: &str,
    locale: &str,
    text: &str,
    term_id: &str,
) -> Vec<(usize, usize)> {
    glossary
        .terms_for(key, locale, text)
        .iter()
        .filter(|term| term.term_id == term_id)
        .map(|term| (term.start, term.end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::analyzer::Analyzers;
    use crate::config::{Config, DEFAULT_BOUNDARY_CHARS};
    use crate::glossary::template::{TermTemplate, TermTemplateCollection};
    use crate::inline::run::Kind;

    fn glossary() -> Glossary {
        let mut templates = TermTemplateCollection::default();
        templates.add(TermTemplate::compile("cat", "en", "cat*").unwrap());
        templates.add(TermTemplate::compile("cat", "de", "Katze*|Kater").unwrap());
        Glossary::new(templates, DEFAULT_BOUNDARY_CHARS)
    }

    fn check(
        glossary: &Glossary,
        source: Option<&str>,
        text: &str,
    ) -> (Vec<crate::diagnostic::Diagnostic>, RunSequence) {
        let config = Config::default();
        let analyzers = Analyzers::new(vec![Box::new(GlossaryAnalyzer {})]);
        let mut analysis = Analysis::new(&config).with_glossary(Some(glossary));
        let entry = EntryContext {
            key: "key",
            locale: "de",
            text,
            kind: None,
            source_locale: source.map(|_| "en"),
            source_text: source,
            baseline_text: None,
        };
        let merged = analysis.annotate_entry(&analyzers, &entry);
        (analysis.diagnostics, merged)
    }

    #[test]
    fn test_terms_consistent() {
        let glossary = glossary();
        let (diags, merged) = check(&glossary, Some("a cat"), "eine Katze");
        assert!(diags.is_empty());
        assert_eq!(merged.to_string(), "eine Katze");
        assert_eq!(merged.runs()[1].kind, Kind::GlossaryTerm);
    }

    #[test]
    fn test_case_error() {
        let glossary = glossary();
        let (diags, _) = check(&glossary, None, "eine katze im Haus");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].message, "glossary term 'cat' with wrong case");
        assert_eq!(diags[0].lines[0].highlights, vec![(5, 10)]);
    }

    #[test]
    fn test_term_missing_in_target() {
        let glossary = glossary();
        let (diags, _) = check(&glossary, Some("a cat"), "ein Tier");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "glossary term 'cat' not used in de");
        assert_eq!(diags[0].lines[0].locale, "en");
        assert_eq!(diags[0].lines[0].highlights, vec![(2, 5)]);
    }

    #[test]
    fn test_term_missing_in_source() {
        let glossary = glossary();
        let (diags, _) = check(&glossary, Some("an animal"), "ein Kater");
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message,
            "glossary term 'cat' has no counterpart in en"
        );
        assert_eq!(diags[0].lines[2].highlights, vec![(4, 9)]);
    }

    #[test]
    fn test_no_glossary() {
        let config = Config::default();
        let analyzers = Analyzers::new(vec![Box::new(GlossaryAnalyzer {})]);
        let mut analysis = Analysis::new(&config);
        let entry = EntryContext {
            key: "key",
            locale: "de",
            text: "eine Katze",
            kind: None,
            source_locale: None,
            source_text: None,
            baseline_text: None,
        };
        let merged = analysis.annotate_entry(&analyzers, &entry);
        assert!(analysis.diagnostics.is_empty());
        assert_eq!(merged.to_string(), "eine Katze");
    }
}
