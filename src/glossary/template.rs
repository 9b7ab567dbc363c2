// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Compilation of glossary term definitions into matchable templates.
//!
//! A definition is a `|`-separated list of alternative surface forms. Each
//! alternative is `*`-separated into ordered word pieces; a trailing `*`
//! means the last piece may be followed by a short fuzzy suffix (inflected
//! forms like "cats" for "cat*"). Templates are built once per (term,
//! locale) pair when the glossary loads and are immutable until reload.

use std::collections::HashMap;

/// One alternative surface form of a term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alternative {
    /// Ordered word pieces, all non-empty.
    pub pieces: Vec<String>,
    /// `true` when the definition ends with `*`: the last piece may be
    /// followed by extra non-boundary characters.
    pub fuzzy_suffix: bool,
}

/// The matchable form of one glossary term in one locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermTemplate {
    pub term_id: String,
    pub locale: String,
    pub alternatives: Vec<Alternative>,
}

impl TermTemplate {
    /// Compile a term definition for one locale.
    ///
    /// Malformed alternatives (no pieces at all, e.g. `*` or an empty string
    /// between pipes) are skipped; `None` is returned only when no
    /// alternative survives.
    #[must_use]
    pub fn compile(term_id: &str, locale: &str, definition: &str) -> Option<Self> {
        let alternatives: Vec<Alternative> = definition
            .split('|')
            .filter_map(|alternative| {
                let alternative = alternative.trim();
                let fuzzy_suffix = alternative.ends_with('*');
                let pieces: Vec<String> = alternative
                    .split('*')
                    .filter(|piece| !piece.is_empty())
                    .map(ToString::to_string)
                    .collect();
                if pieces.is_empty() {
                    None
                } else {
                    Some(Alternative {
                        pieces,
                        fuzzy_suffix,
                    })
                }
            })
            .collect();
        if alternatives.is_empty() {
            return None;
        }
        Some(Self {
            term_id: term_id.to_string(),
            locale: locale.to_string(),
            alternatives,
        })
    }
}

/// All compiled templates, grouped by locale.
#[derive(Clone, Debug, Default)]
pub struct TermTemplateCollection {
    by_locale: HashMap<String, Vec<TermTemplate>>,
}

impl TermTemplateCollection {
    /// Add a compiled template.
    pub fn add(&mut self, template: TermTemplate) {
        self.by_locale
            .entry(template.locale.clone())
            .or_default()
            .push(template);
    }

    /// Get the templates for a locale.
    #[must_use]
    pub fn for_locale(&self, locale: &str) -> &[TermTemplate] {
        self.by_locale
            .get(locale)
            .map_or(&[], |templates| templates.as_slice())
    }

    /// Return `true` if no template was added at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_locale.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_simple() {
        let template = TermTemplate::compile("cat", "en", "cat").unwrap();
        assert_eq!(template.term_id, "cat");
        assert_eq!(template.locale, "en");
        assert_eq!(
            template.alternatives,
            vec![Alternative {
                pieces: vec!["cat".to_string()],
                fuzzy_suffix: false,
            }]
        );
    }

    #[test]
    fn test_compile_fuzzy_suffix() {
        let template = TermTemplate::compile("cat", "en", "cat*").unwrap();
        assert_eq!(
            template.alternatives,
            vec![Alternative {
                pieces: vec!["cat".to_string()],
                fuzzy_suffix: true,
            }]
        );
    }

    #[test]
    fn test_compile_alternatives() {
        let template = TermTemplate::compile("cat", "de", "Katze*|Kater").unwrap();
        assert_eq!(template.alternatives.len(), 2);
        assert_eq!(template.alternatives[0].pieces, vec!["Katze".to_string()]);
        assert!(template.alternatives[0].fuzzy_suffix);
        assert_eq!(template.alternatives[1].pieces, vec!["Kater".to_string()]);
        assert!(!template.alternatives[1].fuzzy_suffix);
    }

    #[test]
    fn test_compile_multi_piece() {
        let template = TermTemplate::compile("ny", "en", "New*York*").unwrap();
        assert_eq!(
            template.alternatives[0].pieces,
            vec!["New".to_string(), "York".to_string()]
        );
        assert!(template.alternatives[0].fuzzy_suffix);
    }

    #[test]
    fn test_compile_malformed() {
        // A bare asterisk has no piece.
        assert_eq!(TermTemplate::compile("x", "en", "*"), None);
        assert_eq!(TermTemplate::compile("x", "en", ""), None);
        // One bad alternative does not reject the others.
        let template = TermTemplate::compile("x", "en", "|good|*").unwrap();
        assert_eq!(template.alternatives.len(), 1);
        assert_eq!(template.alternatives[0].pieces, vec!["good".to_string()]);
    }

    #[test]
    fn test_collection() {
        let mut collection = TermTemplateCollection::default();
        assert!(collection.is_empty());
        collection.add(TermTemplate::compile("cat", "en", "cat*").unwrap());
        collection.add(TermTemplate::compile("cat", "de", "Katze*").unwrap());
        collection.add(TermTemplate::compile("dog", "en", "dog").unwrap());
        assert_eq!(collection.for_locale("en").len(), 2);
        assert_eq!(collection.for_locale("de").len(), 1);
        assert!(collection.for_locale("fr").is_empty());
    }
}
