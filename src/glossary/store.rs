// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Glossary store: compiled templates plus the per-entry match cache.

use std::{
    collections::HashMap,
    error::Error,
    path::Path,
    sync::{Arc, RwLock, atomic::AtomicBool, atomic::Ordering},
};

use colored::Colorize;
use rayon::prelude::*;
use serde::Deserialize;

use crate::config::Config;
use crate::glossary::matcher::{TermEntry, find_term_entries};
use crate::glossary::template::{TermTemplate, TermTemplateCollection};
use crate::inline::run::{Kind, Run, RunSequence};

const TERM_COLOR: colored::Color = colored::Color::Blue;
const CASE_ERROR_COLOR: colored::Color = colored::Color::Red;

/// One row of the glossary JSON file.
#[derive(Debug, Deserialize)]
pub struct GlossaryRow {
    pub id: String,
    pub translations: HashMap<String, String>,
}

/// Compiled glossary templates plus a cache of term matches per
/// (string key, locale).
///
/// The cache has no dependency tracking: whoever mutates an entry's text
/// must call [`Glossary::analyze_locale_entry`] to replace the cached
/// matches, otherwise reads keep returning the stale list. Reads from
/// different entries can run concurrently; each entry only touches its own
/// key.
pub struct Glossary {
    templates: TermTemplateCollection,
    boundary_chars: String,
    cache: RwLock<HashMap<(String, String), Arc<Vec<TermEntry>>>>,
}

impl Glossary {
    /// Create a glossary from compiled templates.
    #[must_use]
    pub fn new(templates: TermTemplateCollection, boundary_chars: &str) -> Self {
        Self {
            templates,
            boundary_chars: boundary_chars.to_string(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Load a glossary from a JSON file (array of rows with per-locale
    /// definitions).
    ///
    /// A malformed row or definition is reported as a warning and skipped so
    /// one bad entry does not block all annotation; unknown locales (when a
    /// registry is configured) are skipped silently.
    pub fn load(path: &Path, config: &Config) -> Result<Self, Box<dyn Error>> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| format!("could not read {}: {err}", path.display()))?;
        let rows: Vec<serde_json::Value> = serde_json::from_str(&content)
            .map_err(|err| format!("could not parse {}: {err}", path.display()))?;
        let mut templates = TermTemplateCollection::default();
        for (index, value) in rows.into_iter().enumerate() {
            let row: GlossaryRow = match serde_json::from_value(value) {
                Ok(row) => row,
                Err(err) => {
                    eprintln!(
                        "{}: {}: invalid glossary row #{index}: {err}",
                        "Warning".yellow(),
                        path.display(),
                    );
                    continue;
                }
            };
            for (locale, definition) in &row.translations {
                if !config.locales.is_known(locale) {
                    continue;
                }
                match TermTemplate::compile(&row.id, locale, definition) {
                    Some(template) => templates.add(template),
                    None => {
                        eprintln!(
                            "{}: {}: term '{}' has no usable definition for locale '{locale}'",
                            "Warning".yellow(),
                            path.display(),
                            row.id,
                        );
                    }
                }
            }
        }
        Ok(Self::new(templates, &config.glossary.boundary_chars))
    }

    /// Return `true` if the glossary has no compiled template.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Get the term matches for one locale entry, computing and caching them
    /// on first access (insert-if-absent).
    #[must_use]
    pub fn terms_for(&self, key: &str, locale: &str, text: &str) -> Arc<Vec<TermEntry>> {
        let cache_key = (key.to_string(), locale.to_string());
        if let Some(entries) = self.cache.read().unwrap().get(&cache_key) {
            return Arc::clone(entries);
        }
        let entries = Arc::new(self.scan(key, locale, text));
        self.cache
            .write()
            .unwrap()
            .entry(cache_key)
            .or_insert_with(|| Arc::clone(&entries));
        entries
    }

    /// Recompute the term matches for one locale entry, replacing whatever
    /// the cache holds.
    ///
    /// This is the invalidation entry point: it must be called whenever the
    /// entry's text changes.
    pub fn analyze_locale_entry(&self, key: &str, locale: &str, text: &str) {
        let entries = Arc::new(self.scan(key, locale, text));
        self.cache
            .write()
            .unwrap()
            .insert((key.to_string(), locale.to_string()), entries);
    }

    /// Recompute the term matches of a whole corpus in parallel.
    ///
    /// The cancellation flag is checked between entries; one entry's scan is
    /// not cancellable.
    pub fn analyze_all(&self, entries: &[(&str, &str, &str)], cancel: &AtomicBool) {
        entries.par_iter().for_each(|(key, locale, text)| {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            self.analyze_locale_entry(key, locale, text);
        });
    }

    fn scan(&self, key: &str, locale: &str, text: &str) -> Vec<TermEntry> {
        find_term_entries(
            self.templates.for_locale(locale),
            text,
            key,
            &self.boundary_chars,
        )
    }

    /// Build the styled runs of a locale entry's text with its glossary
    /// matches highlighted (case errors styled distinctly).
    #[must_use]
    pub fn make_inlines(&self, text: &str, key: &str, locale: &str) -> RunSequence {
        let entries = self.terms_for(key, locale, text);
        let mut sequence = RunSequence::new();
        let mut pos = 0;
        for entry in entries.iter() {
            if entry.start < pos {
                continue;
            }
            sequence.push(Run::new(&text[pos..entry.start]));
            let run = Run::new(&text[entry.start..entry.end]).with_kind(Kind::GlossaryTerm);
            let run = if entry.case_error {
                run.with_fg(CASE_ERROR_COLOR).with_underline()
            } else {
                run.with_fg(TERM_COLOR)
            };
            sequence.push(run);
            pos = entry.end;
        }
        sequence.push(Run::new(&text[pos..]));
        sequence
    }

    /// Term ids found in one locale's text but absent from the paired
    /// locale's (a set-membership check against both cached match lists).
    #[must_use]
    pub fn missing_term_ids(
        &self,
        key: &str,
        locale: &str,
        text: &str,
        sibling_locale: &str,
        sibling_text: &str,
    ) -> Vec<String> {
        let entries = self.terms_for(key, locale, text);
        let sibling = self.terms_for(key, sibling_locale, sibling_text);
        let mut missing: Vec<String> = entries
            .iter()
            .filter(|entry| !sibling.iter().any(|s| s.term_id == entry.term_id))
            .map(|entry| entry.term_id.clone())
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }
}
