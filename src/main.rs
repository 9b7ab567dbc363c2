// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Locexam is a blazingly fast checker for game localization string databases,
//! with a comprehensive diagnostic report.
//!
//! It checks JSON locale files containing strings with inline game markup
//! (like `{g|a|b}` or `{mf|he|she}`) and reports very few false positives,
//! so it can be used in CI jobs or pre-commit hooks.
//!
//! The following sub-commands are available:
//!
//! - [`check`](#check-files): check files
//! - [`analyzers`](#analyzers): display analyzers used to check files
//! - [`stats`](#stats): display statistics about files
//!
//! # Check files
//!
//! The `check` command checks all locale database files (*.json) given on
//! command-line or found in the provided directories.
//!
//! Every entry goes through the analyzer pipeline: markup tag pairing and
//! cross-locale consistency, diff against a baseline version, glossary term
//! usage, length limits and filter-term highlighting. The merged annotated
//! text can be displayed with `--annotate`.
//!
//! The .gitignore rules are respected: ignored files are skipped.
//!
//! # Analyzers
//!
//! The `analyzers` command displays the analyzers used to check files.
//!
//! # Stats
//!
//! The `stats` command displays statistics about locale database files:
//! number of entries, words, characters and markup tags.

mod analyze;
mod analyzers;
mod args;
mod config;
mod db;
mod diagnostic;
mod dir;
mod glossary;
mod inline;
mod render;
mod result;
mod stats;
mod tags;

use clap::Parser;

use crate::analyze::run_check;
use crate::analyzers::analyzer::run_analyzers;
use crate::args::{Cli, Command};
use crate::stats::run_stats;

fn main() {
    let args = Cli::parse();
    let rc = match &args.command {
        Command::Check(args) => run_check(args),
        Command::Analyzers(args) => run_analyzers(args),
        Command::Stats(args) => run_stats(args),
    };
    std::process::exit(rc);
}
