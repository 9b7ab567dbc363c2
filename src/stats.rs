// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Statistics for locale database files.

use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;

use crate::args;
use crate::db::LocaleFile;
use crate::dir::find_locale_files;
use crate::tags::list::extract_tags;
use crate::tags::scan::{count_word_chars, count_words};

#[derive(Clone, Copy, Default, Serialize)]
struct Counts {
    entries: u64,
    words: u64,
    chars: u64,
    tags: u64,
}

#[derive(Default, Serialize)]
struct StatsFile {
    path: PathBuf,
    locale: String,
    counts: Counts,
}

impl AddAssign for Counts {
    /// Add the values from another `Counts` struct to this one.
    fn add_assign(&mut self, other: Self) {
        *self = Self {
            entries: self.entries + other.entries,
            words: self.words + other.words,
            chars: self.chars + other.chars,
            tags: self.tags + other.tags,
        };
    }
}

impl std::fmt::Display for Counts {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} entries, {} words, {} chars, {} tags",
            format!("{}", self.entries).bright_green(),
            format!("{}", self.words).bright_green(),
            format!("{}", self.chars).bright_green(),
            format!("{}", self.tags).bright_green(),
        )
    }
}

/// Compute statistics for a single locale file.
fn stats_file(path: &Path) -> Option<StatsFile> {
    let file = match LocaleFile::load(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("{}: {err}", "Warning".yellow());
            return None;
        }
    };
    let mut counts = Counts::default();
    for entry in file.entries.values() {
        counts += Counts {
            entries: 1,
            words: count_words(&entry.text),
            chars: count_word_chars(&entry.text),
            tags: extract_tags(&entry.text).len() as u64,
        };
    }
    Some(StatsFile {
        path: PathBuf::from(path),
        locale: file.locale,
        counts,
    })
}

/// Display statistics in human format.
fn display_stats_human(stats: &[StatsFile]) {
    for file in stats {
        println!(
            "{} ({}): {}",
            file.path.display().to_string().white().bold(),
            file.locale.cyan(),
            file.counts,
        );
    }
    if stats.len() > 1 {
        let mut total = Counts::default();
        for file in stats {
            total += file.counts;
        }
        println!("Total: {total}");
    }
}

/// Display statistics about locale database files and return the exit code.
pub fn run_stats(args: &args::StatsArgs) -> i32 {
    let files = find_locale_files(&args.files);
    let mut stats: Vec<StatsFile> = files.par_iter().filter_map(|path| stats_file(path)).collect();
    match args.sort {
        args::StatsSort::Path => stats.sort_by(|a, b| a.path.cmp(&b.path)),
        args::StatsSort::Words => {
            stats.sort_by(|a, b| {
                b.counts
                    .words
                    .cmp(&a.counts.words)
                    .then_with(|| a.path.cmp(&b.path))
            });
        }
    }
    match args.output {
        args::OutputFormat::Human => display_stats_human(&stats),
        args::OutputFormat::Json => {
            println!("{}", serde_json::to_string(&stats).unwrap_or_default());
        }
    }
    0
}
