// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Terminal rendering of styled run sequences.

use colored::Colorize;

use crate::inline::run::{RunSequence, Weight};

/// Render a run sequence as an ANSI-styled string.
#[must_use]
pub fn ansi(sequence: &RunSequence) -> String {
    let mut out = String::new();
    for run in sequence.runs() {
        let mut styled = run.text().normal();
        if let Some(fg) = run.fg {
            styled = styled.color(fg);
        }
        if let Some(bg) = run.bg {
            styled = styled.on_color(bg);
        }
        if run.weight == Some(Weight::Bold) {
            styled = styled.bold();
        }
        if run.strikethrough {
            styled = styled.strikethrough();
        }
        if run.underline {
            styled = styled.underline();
        }
        out.push_str(&styled.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::run::Run;
    use colored::Color;

    #[test]
    fn test_ansi_plain() {
        let sequence = RunSequence::plain("plain text");
        assert_eq!(ansi(&sequence), "plain text".normal().to_string());
    }

    #[test]
    fn test_ansi_styled() {
        let sequence: RunSequence = [
            Run::new("a "),
            Run::new("cat").with_fg(Color::Blue).with_underline(),
        ]
        .into_iter()
        .collect();
        let expected = format!(
            "{}{}",
            "a ".normal(),
            "cat".normal().color(Color::Blue).underline()
        );
        assert_eq!(ansi(&sequence), expected);
    }
}
