// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Extraction of markup tags, open/close pairing and cross-locale comparison.

use crate::config::TagConfig;
use crate::tags::scan::{TokenKind, Tokens, tag_body};

/// One markup tag found in a localized string.
///
/// `name` is lowercased for pairing; `full_text` keeps the verbatim matched
/// substring (braces and subtags included) and is the equality key used when
/// comparing two locales: `{bc|a|b}` must appear byte-identical on the other
/// side to be considered matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub start: usize,
    pub end: usize,
    pub name: String,
    pub full_text: String,
    pub is_closing: bool,
    /// Index of the paired closing tag in the owning list, set on openers only.
    pub closing: Option<usize>,
    pub unmatched: bool,
    pub wrong_open_close: bool,
}

/// Extract all well-formed markup tags from a string, in text order.
#[must_use]
pub fn extract_tags(text: &str) -> Vec<Tag> {
    Tokens::new(text)
        .filter(|token| token.kind == TokenKind::Tag)
        .filter_map(|token| {
            let body = &token.text[1..token.text.len() - 1];
            tag_body(body).map(|(name, is_closing)| Tag {
                start: token.start,
                end: token.end,
                name,
                full_text: token.text.to_string(),
                is_closing,
                closing: None,
                unmatched: false,
                wrong_open_close: false,
            })
        })
        .collect()
}

/// All markup tags of one string, with pairing state.
///
/// `has_unmatched` is computed lazily by [`TagsList::compare`]; it stays
/// `None` until two lists have been compared.
#[derive(Clone, Debug, Default)]
pub struct TagsList {
    pub tags: Vec<Tag>,
    pub has_unmatched: Option<bool>,
}

impl TagsList {
    /// Parse a string and pair opening/closing tags.
    ///
    /// Only tag names in the configured needs-closing set participate in
    /// pairing; single markers like `{n}` are exempt. Pairing uses a stack:
    /// a mismatched closer is flagged and leaves the stack untouched, so it
    /// does not corrupt the pairing of surrounding correctly-nested tags; an
    /// unbalanced opener stays on the stack (and stays flagged) for the rest
    /// of the scan.
    #[must_use]
    pub fn parse(text: &str, config: &TagConfig) -> Self {
        let mut tags = extract_tags(text);
        let mut stack: Vec<usize> = Vec::new();
        for idx in 0..tags.len() {
            if !config.need_closing.contains(&tags[idx].name) {
                // Closing tags are only legal for names that require closing.
                if tags[idx].is_closing {
                    tags[idx].wrong_open_close = true;
                }
                continue;
            }
            if tags[idx].is_closing {
                match stack.last().copied() {
                    Some(top) if tags[top].name == tags[idx].name => {
                        stack.pop();
                        tags[top].closing = Some(idx);
                        tags[top].wrong_open_close = false;
                    }
                    _ => tags[idx].wrong_open_close = true,
                }
            } else {
                // Flagged until the matching closer is found.
                tags[idx].wrong_open_close = true;
                stack.push(idx);
            }
        }
        Self {
            tags,
            has_unmatched: None,
        }
    }

    /// Compare the tags of two locale entries and return `true` when they match.
    ///
    /// Each opening tag of one list (ignore set excluded) must appear with an
    /// identical `full_text` in the other list; otherwise the tag and its
    /// paired closer are flagged `unmatched`. The check runs in both
    /// directions and `has_unmatched` is set on both lists to the OR of both
    /// results, so the boolean result does not depend on argument order.
    pub fn compare(a: &mut Self, b: &mut Self, config: &TagConfig) -> bool {
        let unmatched_a = Self::mark_unmatched(a, b, config);
        let unmatched_b = Self::mark_unmatched(b, a, config);
        let has_unmatched = unmatched_a || unmatched_b;
        a.has_unmatched = Some(has_unmatched);
        b.has_unmatched = Some(has_unmatched);
        !has_unmatched
    }

    /// Flag opening tags of `list` with no identical counterpart in `other`.
    fn mark_unmatched(list: &mut Self, other: &Self, config: &TagConfig) -> bool {
        let mut found = false;
        for idx in 0..list.tags.len() {
            if list.tags[idx].is_closing || config.ignore_mismatched.contains(&list.tags[idx].name)
            {
                continue;
            }
            if other
                .tags
                .iter()
                .any(|tag| tag.full_text == list.tags[idx].full_text)
            {
                continue;
            }
            list.tags[idx].unmatched = true;
            if let Some(closer) = list.tags[idx].closing {
                list.tags[closer].unmatched = true;
            }
            found = true;
        }
        found
    }

    /// Iterator over the tags flagged by [`TagsList::parse`] (bad pairing).
    pub fn wrong_open_close(&self) -> impl Iterator<Item = &Tag> + '_ {
        self.tags.iter().filter(|tag| tag.wrong_open_close)
    }

    /// Iterator over the tags flagged by [`TagsList::compare`] (missing on the other side).
    pub fn unmatched(&self) -> impl Iterator<Item = &Tag> + '_ {
        self.tags.iter().filter(|tag| tag.unmatched)
    }
}
