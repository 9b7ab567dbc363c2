// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Styled text runs.
//!
//! A [`Run`] is a contiguous fragment of text with display attributes; a
//! [`RunSequence`] is an ordered list of runs whose concatenated text
//! reconstructs exactly the analyzed string. Every analyzer produces a
//! sequence over the same underlying text and the merge algorithm folds them
//! together, relying on that reconstruction invariant as its precondition.

use colored::Color;

/// Semantic meaning of a run, independent of its display attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Kind {
    #[default]
    Default,
    DiffDelete,
    DiffInsert,
    SpellError,
    GlossaryTerm,
    MaxLength,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weight {
    Normal,
    Bold,
}

/// One styled text fragment.
///
/// The text is fixed at construction: transformations build new runs instead
/// of editing in place. Style attributes are `Option` where the merge
/// precedence needs to distinguish "set" from "unset".
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    text: String,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub strikethrough: bool,
    pub underline: bool,
    pub weight: Option<Weight>,
    pub kind: Kind,
}

impl Run {
    /// Create a new unstyled `Run` with the given text.
    #[must_use]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            fg: None,
            bg: None,
            strikethrough: false,
            underline: false,
            weight: None,
            kind: Kind::Default,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub fn with_fg(mut self, fg: Color) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn with_bg(mut self, bg: Color) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Set the strikethrough flag.
    #[must_use]
    pub fn with_strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    /// Set the underline flag.
    #[must_use]
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Set the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Set the annotation kind.
    #[must_use]
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    /// Get the text of the run.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get a slice of the run text, or `None` when the byte range is out of
    /// bounds or not on char boundaries.
    ///
    /// This is a non-throwing boundary check: callers skip the run instead of
    /// failing the whole analysis.
    #[must_use]
    pub fn try_slice(&self, start: usize, end: usize) -> Option<&str> {
        self.text.get(start..end)
    }
}

/// An ordered sequence of styled runs over one analyzed string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSequence {
    runs: Vec<Run>,
}

impl RunSequence {
    /// Create a new empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence holding the whole text as a single unstyled run.
    #[must_use]
    pub fn plain(text: &str) -> Self {
        let mut sequence = Self::new();
        sequence.push(Run::new(text));
        sequence
    }

    /// Append a run; empty runs are dropped.
    pub fn push(&mut self, run: Run) {
        if !run.text.is_empty() {
            self.runs.push(run);
        }
    }

    /// Get the runs.
    #[must_use]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Return `true` if the sequence has no runs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Total byte length of the reconstructed text.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.runs.iter().map(|run| run.text.len()).sum()
    }
}

impl std::fmt::Display for RunSequence {
    /// Reconstruct the analyzed text by concatenating all runs.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for run in &self.runs {
            write!(f, "{}", run.text)?;
        }
        Ok(())
    }
}

impl FromIterator<Run> for RunSequence {
    fn from_iter<I: IntoIterator<Item = Run>>(iter: I) -> Self {
        let mut sequence = Self::new();
        for run in iter {
            sequence.push(run);
        }
        sequence
    }
}
