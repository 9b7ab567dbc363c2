// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tokenizer for localized strings with inline game markup.
//!
//! A string is split into maximal runs of three kinds:
//!
//! - words: letters/digits, with internal apostrophes and hyphens
//! - markup tags: `{name|sub1|sub2}` (opening) or `{/name}` (closing)
//! - separators: everything else
//!
//! A `{` that does not start a well-formed tag is plain separator text:
//! malformed markup never fails, it degrades to literal text.

use memchr::memchr2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Separator,
    Tag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

pub struct Tokens<'a> {
    s: &'a str,
    bytes: &'a [u8],
    len: usize,
    pos: usize,
}

impl<'a> Tokens<'a> {
    /// Create a new `Tokens` iterator over the given string.
    #[must_use]
    pub fn new(s: &'a str) -> Self {
        let bytes = s.as_bytes();
        let len = bytes.len();
        Self {
            s,
            bytes,
            len,
            pos: 0,
        }
    }

    /// Find the end of a well-formed tag starting with the `{` at `start`.
    ///
    /// The index returned is the byte just after the closing `}`.
    fn tag_end(&self, start: usize) -> Option<usize> {
        let rest = &self.bytes[start + 1..];
        match memchr2(b'}', b'{', rest) {
            Some(idx) if rest[idx] == b'}' => {
                let body = &self.s[start + 1..start + 1 + idx];
                tag_body(body).map(|_| start + idx + 2)
            }
            _ => None,
        }
    }

    /// Find the end of the word starting at `start` (first char is alphanumeric).
    ///
    /// Apostrophes and hyphens are part of the word only when followed by
    /// another word character.
    fn word_end(&self, start: usize) -> usize {
        let mut end = start;
        while end < self.len {
            let rest = &self.s[end..];
            let Some(c) = rest.chars().next() else {
                break;
            };
            if c.is_alphanumeric() {
                end += c.len_utf8();
            } else if matches!(c, '\'' | '’' | '-')
                && end > start
                && rest[c.len_utf8()..]
                    .chars()
                    .next()
                    .is_some_and(char::is_alphanumeric)
            {
                end += c.len_utf8();
            } else {
                break;
            }
        }
        end
    }
}

/// Validate a candidate tag body (the text between the braces) and return the
/// lowercased tag name with the closing flag.
///
/// An opening body is a non-empty alphanumeric name optionally followed by
/// `|`-separated subtags; a closing body is `/` followed by the name alone.
pub(crate) fn tag_body(body: &str) -> Option<(String, bool)> {
    let (is_closing, rest) = match body.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let name = match rest.split_once('|') {
        Some((name, _)) if !is_closing => name,
        Some(_) => return None,
        None => rest,
    };
    if name.is_empty() || !name.chars().all(char::is_alphanumeric) {
        return None;
    }
    Some((name.to_lowercase(), is_closing))
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }
        let start = self.pos;
        if self.bytes[start] == b'{'
            && let Some(end) = self.tag_end(start)
        {
            self.pos = end;
            return Some(Token {
                kind: TokenKind::Tag,
                start,
                end,
                text: &self.s[start..end],
            });
        }
        let first = self.s[start..].chars().next()?;
        if first.is_alphanumeric() {
            let end = self.word_end(start);
            self.pos = end;
            return Some(Token {
                kind: TokenKind::Word,
                start,
                end,
                text: &self.s[start..end],
            });
        }
        // Separator run: everything up to the next word or well-formed tag.
        let mut end = start + first.len_utf8();
        while end < self.len {
            if self.bytes[end] == b'{' && self.tag_end(end).is_some() {
                break;
            }
            let Some(c) = self.s[end..].chars().next() else {
                break;
            };
            if c.is_alphanumeric() {
                break;
            }
            end += c.len_utf8();
        }
        self.pos = end;
        Some(Token {
            kind: TokenKind::Separator,
            start,
            end,
            text: &self.s[start..end],
        })
    }
}

/// Count words in a string, markup tags excluded.
#[must_use]
pub fn count_words(s: &str) -> u64 {
    Tokens::new(s)
        .filter(|t| t.kind == TokenKind::Word)
        .count() as u64
}

/// Count word characters (UTF-8 chars inside words) in a string, markup tags excluded.
#[must_use]
pub fn count_word_chars(s: &str) -> u64 {
    Tokens::new(s)
        .filter(|t| t.kind == TokenKind::Word)
        .map(|t| t.text.chars().count() as u64)
        .sum()
}
