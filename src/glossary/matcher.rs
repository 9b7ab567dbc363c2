// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scan of localized text for glossary term occurrences.
//!
//! Matching is case-insensitive and anchored at word boundaries; fuzzy
//! regions (the gap between two pieces of a multi-piece alternative, or the
//! suffix after a trailing `*`) span strictly fewer than
//! [`MAX_SYMBOLS_IN_ASTERISK`] characters. Case correctness is checked
//! separately with a sentence-start heuristic and never rejects a match.

use crate::glossary::template::{Alternative, TermTemplate};

/// Upper bound (exclusive) of a fuzzy region, in characters.
pub const MAX_SYMBOLS_IN_ASTERISK: usize = 5;

/// One located occurrence of a glossary term.
///
/// `start`/`end` are byte offsets into the scanned text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermEntry {
    pub term_id: String,
    pub string_key: String,
    pub start: usize,
    pub end: usize,
    pub case_error: bool,
}

/// Char-indexed view of a text, with byte offsets kept for the output.
pub(crate) struct TextScan {
    chars: Vec<char>,
    offsets: Vec<usize>,
}

impl TextScan {
    pub(crate) fn new(text: &str) -> Self {
        let mut chars = Vec::new();
        let mut offsets = Vec::new();
        for (offset, c) in text.char_indices() {
            chars.push(c);
            offsets.push(offset);
        }
        offsets.push(text.len());
        Self { chars, offsets }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn char(&self, idx: usize) -> char {
        self.chars[idx]
    }

    fn byte(&self, char_idx: usize) -> usize {
        self.offsets[char_idx]
    }
}

/// Result of one alternative match attempt, in char indices.
struct AltMatch {
    start: usize,
    end: usize,
    full: bool,
    case_error: bool,
}

fn char_eq_ci(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Find the next case-insensitive occurrence of `piece` at index >= `from`.
fn find_ci(scan: &TextScan, piece: &[char], from: usize) -> Option<usize> {
    if piece.is_empty() || scan.len() < piece.len() {
        return None;
    }
    (from..=scan.len() - piece.len()).find(|&start| {
        piece
            .iter()
            .enumerate()
            .all(|(idx, &c)| char_eq_ci(scan.char(start + idx), c))
    })
}

/// Check if a match starting at `idx` sits in a sentence-start context:
/// start of string, or sentence punctuation within the 1-3 preceding chars.
fn sentence_start(scan: &TextScan, idx: usize) -> bool {
    if idx == 0 {
        return true;
    }
    let mut looked = 0;
    let mut pos = idx;
    while pos > 0 && looked < 3 {
        pos -= 1;
        looked += 1;
        let c = scan.char(pos);
        if c.is_whitespace() {
            if pos == 0 {
                return true;
            }
            continue;
        }
        return matches!(c, '.' | '!' | '?' | '…');
    }
    false
}

/// Try to match one alternative, searching from char index `from`.
///
/// A partial match (pieces found but window exceeded, or no boundary after
/// the last piece) is still returned so the caller resumes past it; only a
/// full match produces a term entry.
fn match_alternative(
    scan: &TextScan,
    alternative: &Alternative,
    from: usize,
    boundary: &str,
) -> Option<AltMatch> {
    let first: Vec<char> = alternative.pieces[0].chars().collect();
    let mut search = from;
    let start = loop {
        let start = find_ci(scan, &first, search)?;
        if start == 0 || boundary.contains(scan.char(start - 1)) {
            break start;
        }
        search = start + 1;
    };
    let mut end = start + first.len();
    let mut full = true;
    for piece in &alternative.pieces[1..] {
        let piece: Vec<char> = piece.chars().collect();
        match find_ci(scan, &piece, end) {
            Some(pos) if pos - end < MAX_SYMBOLS_IN_ASTERISK => end = pos + piece.len(),
            _ => {
                full = false;
                break;
            }
        }
    }
    if full {
        if alternative.fuzzy_suffix {
            let mut extra = 0;
            while end < scan.len() && !boundary.contains(scan.char(end)) {
                extra += 1;
                if extra >= MAX_SYMBOLS_IN_ASTERISK {
                    full = false;
                    break;
                }
                end += 1;
            }
        } else if end < scan.len() && !boundary.contains(scan.char(end)) {
            full = false;
        }
    }
    let case_error = full && {
        let text_first = scan.char(start);
        let template_first = first[0];
        text_first != template_first
            && !(text_first.is_uppercase()
                && template_first.is_lowercase()
                && sentence_start(scan, start))
    };
    Some(AltMatch {
        start,
        end,
        full,
        case_error,
    })
}

/// Find all occurrences of one term template in a text.
///
/// The scan resumes past every match, full or partial, so overlapping hits
/// of the same alternative are not reported twice.
pub(crate) fn try_find_term_entries(
    template: &TermTemplate,
    scan: &TextScan,
    string_key: &str,
    boundary: &str,
) -> Vec<TermEntry> {
    let mut entries = Vec::new();
    for alternative in &template.alternatives {
        let mut pos = 0;
        while pos < scan.len() {
            let Some(found) = match_alternative(scan, alternative, pos, boundary) else {
                break;
            };
            if found.full {
                entries.push(TermEntry {
                    term_id: template.term_id.clone(),
                    string_key: string_key.to_string(),
                    start: scan.byte(found.start),
                    end: scan.byte(found.end),
                    case_error: found.case_error,
                });
            }
            pos = found.end.max(found.start + 1);
        }
    }
    entries
}

/// Remove every match fully contained in a longer match's span.
///
/// Sorted by length so containment is checked against kept entries only;
/// identical spans reported by several alternatives collapse to one.
#[must_use]
pub fn filter_inner_terms(mut entries: Vec<TermEntry>) -> Vec<TermEntry> {
    entries.sort_by(|a, b| {
        (b.end - b.start)
            .cmp(&(a.end - a.start))
            .then(a.start.cmp(&b.start))
    });
    let mut kept: Vec<TermEntry> = Vec::new();
    for entry in entries {
        if !kept
            .iter()
            .any(|k| entry.start >= k.start && entry.end <= k.end)
        {
            kept.push(entry);
        }
    }
    kept.sort_by_key(|entry| (entry.start, entry.end));
    kept
}

/// Scan a text with all templates of a locale and filter nested matches.
#[must_use]
pub fn find_term_entries(
    templates: &[TermTemplate],
    text: &str,
    string_key: &str,
    boundary: &str,
) -> Vec<TermEntry> {
    let scan = TextScan::new(text);
    let mut entries = Vec::new();
    for template in templates {
        entries.extend(try_find_term_entries(template, &scan, string_key, boundary));
    }
    filter_inner_terms(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BOUNDARY_CHARS;
    use crate::glossary::template::TermTemplate;

    fn find(definition: &str, text: &str) -> Vec<TermEntry> {
        let template = TermTemplate::compile("term", "en", definition).unwrap();
        find_term_entries(&[template], text, "key", DEFAULT_BOUNDARY_CHARS)
    }

    #[test]
    fn test_simple_match() {
        let entries = find("cat", "a cat sleeps");
        assert_eq!(entries.len(), 1);
        assert_eq!((entries[0].start, entries[0].end), (2, 5));
        assert!(!entries[0].case_error);
        assert_eq!(&"a cat sleeps"[entries[0].start..entries[0].end], "cat");
    }

    #[test]
    fn test_fuzzy_suffix() {
        // "cats": one extra char.
        let entries = find("cat*", "two cats");
        assert_eq!(entries.len(), 1);
        assert_eq!(&"two cats"[entries[0].start..entries[0].end], "cats");
        // "cat," ends at a boundary char.
        let entries = find("cat*", "a cat, a dog");
        assert_eq!(entries.len(), 1);
        assert_eq!(&"a cat, a dog"[entries[0].start..entries[0].end], "cat");
    }

    #[test]
    fn test_fuzzy_window_exceeded() {
        // "category": 5 extra chars is beyond the fuzzy window.
        assert!(find("cat*", "a category").is_empty());
        // 4 extra chars still fits.
        let entries = find("cat*", "the cattle");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_word_boundary_before() {
        // No boundary before "cat" inside "scatter".
        assert!(find("cat*", "scatter").is_empty());
        assert!(find("cat", "a scatter plot").is_empty());
    }

    #[test]
    fn test_boundary_after_required_without_fuzzy() {
        assert!(find("cat", "category").is_empty());
        assert_eq!(find("cat", "cat!").len(), 1);
        assert_eq!(find("cat", "cat").len(), 1);
    }

    #[test]
    fn test_case_insensitive_with_case_error() {
        // Mid-sentence capitalization of a lowercase template: case error.
        let entries = find("cat", "I like Cat food");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].case_error);
    }

    #[test]
    fn test_sentence_start_tolerated() {
        let entries = find("cat", "Cat food");
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].case_error);

        let entries = find("cat", "Good. Cat food");
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].case_error);
    }

    #[test]
    fn test_uppercase_template_demands_case() {
        let entries = find("Paris", "we visit paris today");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].case_error);

        let entries = find("Paris", "we visit Paris today");
        assert!(!entries[0].case_error);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_multi_piece() {
        let entries = find("New*York", "from New York city");
        assert_eq!(entries.len(), 1);
        assert_eq!(
            &"from New York city"[entries[0].start..entries[0].end],
            "New York"
        );
        // Gap too wide between pieces.
        assert!(find("New*York", "New Jersey and York").is_empty());
    }

    #[test]
    fn test_multiple_occurrences() {
        let entries = find("cat", "cat and cat");
        assert_eq!(entries.len(), 2);
        assert_eq!((entries[0].start, entries[0].end), (0, 3));
        assert_eq!((entries[1].start, entries[1].end), (8, 11));
    }

    #[test]
    fn test_alternatives_dedup() {
        // Both alternatives hit the same span: reported once.
        let entries = find("cat|cat*", "a cat");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_filter_inner_terms() {
        let long = TermTemplate::compile("ny", "en", "New*York").unwrap();
        let short = TermTemplate::compile("york", "en", "York").unwrap();
        let entries = find_term_entries(
            &[long, short],
            "in New York",
            "key",
            DEFAULT_BOUNDARY_CHARS,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].term_id, "ny");
    }

    #[test]
    fn test_unicode_text_offsets() {
        let entries = find("Katze*", "die Kätzchen? die Katzen");
        // "Kätzchen" does not match ("ä" != "a"); "Katzen" does.
        assert_eq!(entries.len(), 1);
        assert_eq!(
            &"die Kätzchen? die Katzen"[entries[0].start..entries[0].end],
            "Katzen"
        );
    }

    #[test]
    fn test_empty_text() {
        assert!(find("cat", "").is_empty());
    }
}
