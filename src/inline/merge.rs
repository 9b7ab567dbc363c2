// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merge of two run sequences over the same underlying text.
//!
//! Both inputs must tokenize strings of equal total length (each analyzer
//! produces its own partition of the same entry text). The output is a third
//! partition whose breakpoints are the union of both inputs', with the styles
//! of overlapping runs combined. When the lengths differ the function is a
//! defined fallback returning `left` unchanged: sequences derived from texts
//! that diverged lose the right-hand annotations instead of failing the
//! whole render.

use crate::inline::run::{Kind, Run, RunSequence};

/// Merge two run sequences into one, combining styles run by run.
///
/// Style precedence per output run: right-wins-if-set for foreground,
/// background and weight; strikethrough and underline are OR'd; the
/// annotation kind is the right run's unless it is `Default`.
#[must_use]
pub fn merge(left: &RunSequence, right: &RunSequence) -> RunSequence {
    if left.text_len() != right.text_len() {
        return left.clone();
    }
    let left_runs = left.runs();
    let right_runs = right.runs();
    let mut merged = RunSequence::new();
    // Run index and consumed char offset, one cursor per side.
    let (mut li, mut ri) = (0, 0);
    let (mut lp, mut rp) = (0usize, 0usize);
    while li < left_runs.len() && ri < right_runs.len() {
        let l = &left_runs[li];
        let r = &right_runs[ri];
        let le = lp + l.text().len();
        let re = rp + r.text().len();
        let start = lp.max(rp);
        let end = le.min(re);
        if start < end {
            // The run that starts later supplies the overlap text; the other
            // side's text is the same, sliced at the union breakpoints.
            let text = if lp < rp {
                r.try_slice(start - rp, end - rp)
            } else {
                l.try_slice(start - lp, end - lp)
            };
            if let Some(text) = text {
                merged.push(combine(text, l, r));
            }
        }
        if le <= re {
            li += 1;
            lp = le;
        }
        if re <= le {
            ri += 1;
            rp = re;
        }
    }
    merged
}

/// Combine the styles of two overlapping runs into a new run over `text`.
fn combine(text: &str, l: &Run, r: &Run) -> Run {
    let mut run = Run::new(text);
    run.fg = r.fg.or(l.fg);
    run.bg = r.bg.or(l.bg);
    run.strikethrough = l.strikethrough || r.strikethrough;
    run.underline = l.underline || r.underline;
    run.weight = r.weight.or(l.weight);
    run.kind = if r.kind == Kind::Default {
        l.kind
    } else {
        r.kind
    };
    run
}
