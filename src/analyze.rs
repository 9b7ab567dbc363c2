// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Analysis of locale database entries.
//!
//! Every entry goes through a fixed pipeline of analyzers (tags, diff,
//! glossary, length, filter); each stage's styled runs are merged into the
//! accumulated result of the previous stages, so the pipeline is a strict
//! sequential chain within one entry. Across entries the analyses are
//! independent pure functions and run in parallel.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use colored::Colorize;
use rayon::prelude::*;

use crate::{
    analyzers::analyzer::{Analyzers, get_selected_analyzers},
    args,
    config::Config,
    db::LocaleFile,
    diagnostic::{Diagnostic, Severity},
    dir::find_locale_files,
    glossary::store::Glossary,
    inline::merge::merge,
    inline::run::RunSequence,
    result::display_result,
};

pub type CheckResult = (PathBuf, Vec<Diagnostic>, Vec<(String, RunSequence)>);

/// Everything an analyzer can see about one locale entry.
#[derive(Clone, Copy)]
pub struct EntryContext<'a> {
    pub key: &'a str,
    pub locale: &'a str,
    pub text: &'a str,
    pub kind: Option<&'a str>,
    /// Locale and text of the same key in the source locale, when this entry
    /// belongs to another locale and the key exists there.
    pub source_locale: Option<&'a str>,
    pub source_text: Option<&'a str>,
    /// Text of the same key in the baseline (previous) version, if any.
    pub baseline_text: Option<&'a str>,
}

/// State shared by the analyzers while one entry is analyzed: configuration,
/// collaborators and the diagnostics reported so far.
pub struct Analysis<'a> {
    pub path: PathBuf,
    pub config: &'a Config,
    pub glossary: Option<&'a Glossary>,
    pub filter: Option<&'a str>,
    pub diagnostics: Vec<Diagnostic>,
    current_analyzer: &'static str,
    current_severity: Severity,
    current_key: String,
}

impl<'a> Analysis<'a> {
    /// Create a new `Analysis` with the given configuration.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            path: PathBuf::new(),
            config,
            glossary: None,
            filter: None,
            diagnostics: Vec::new(),
            current_analyzer: "",
            current_severity: Severity::default(),
            current_key: String::new(),
        }
    }

    /// Set the path of the file being analyzed.
    #[must_use]
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = PathBuf::from(path);
        self
    }

    /// Set the glossary collaborator.
    #[must_use]
    pub fn with_glossary(mut self, glossary: Option<&'a Glossary>) -> Self {
        self.glossary = glossary;
        self
    }

    /// Set the filter term to highlight.
    #[must_use]
    pub fn with_filter(mut self, filter: Option<&'a str>) -> Self {
        self.filter = filter;
        self
    }

    /// Report a diagnostic with a single text line.
    pub fn report_text(
        &mut self,
        message: String,
        locale: &str,
        text: &str,
        highlights: &[(usize, usize)],
    ) {
        let mut diagnostic = Diagnostic::new(
            self.path.as_path(),
            &self.current_key,
            self.current_analyzer,
            self.current_severity,
            message,
        );
        diagnostic.add_message(locale, text, highlights);
        self.diagnostics.push(diagnostic);
    }

    /// Report a diagnostic showing a couple of texts (source/translated or
    /// old/new), separated by an empty line.
    #[allow(clippy::too_many_arguments)]
    pub fn report_msg(
        &mut self,
        message: String,
        locale_a: &str,
        text_a: &str,
        hl_a: &[(usize, usize)],
        locale_b: &str,
        text_b: &str,
        hl_b: &[(usize, usize)],
    ) {
        let mut diagnostic = Diagnostic::new(
            self.path.as_path(),
            &self.current_key,
            self.current_analyzer,
            self.current_severity,
            message,
        );
        diagnostic.add_message(locale_a, text_a, hl_a);
        diagnostic.add_message("", "", &[]);
        diagnostic.add_message(locale_b, text_b, hl_b);
        self.diagnostics.push(diagnostic);
    }

    /// Run the analyzer pipeline on one entry and return the merged runs.
    ///
    /// The fold starts from a single plain run over the entry text; each
    /// analyzer's runs are merged into the accumulated left operand, in
    /// pipeline order.
    pub fn annotate_entry(
        &mut self,
        analyzers: &Analyzers,
        entry: &EntryContext,
    ) -> RunSequence {
        self.current_key = entry.key.to_string();
        let mut merged = RunSequence::plain(entry.text);
        for analyzer in &analyzers.enabled {
            self.current_analyzer = analyzer.name();
            self.current_severity = analyzer.severity();
            if let Some(runs) = analyzer.annotate(self, entry) {
                merged = merge(&merged, &runs);
            }
        }
        merged
    }
}

/// Check a single locale file and return the list of diagnostics found.
#[allow(clippy::too_many_arguments)]
pub fn check_file(
    file: &LocaleFile,
    args: &args::CheckArgs,
    config: &Config,
    analyzers: &Analyzers,
    glossary: Option<&Glossary>,
    source: Option<&LocaleFile>,
    baseline: Option<&LocaleFile>,
    cancel: &AtomicBool,
) -> CheckResult {
    // An entry is never compared against its own locale.
    let source = source.filter(|s| s.locale != file.locale);
    let entries: Vec<_> = file.entries.iter().collect();
    let analyzed: Vec<(Vec<Diagnostic>, Option<(String, RunSequence)>)> = entries
        .par_iter()
        .map(|(key, entry)| {
            if cancel.load(Ordering::Relaxed) {
                return (Vec::new(), None);
            }
            let mut analysis = Analysis::new(config)
                .with_path(&file.path)
                .with_glossary(glossary)
                .with_filter(args.filter.as_deref());
            let context = EntryContext {
                key: key.as_str(),
                locale: &file.locale,
                text: &entry.text,
                kind: entry.kind.as_deref(),
                source_locale: source.map(|s| s.locale.as_str()),
                source_text: source
                    .and_then(|s| s.entries.get(*key))
                    .map(|e| e.text.as_str()),
                baseline_text: baseline
                    .and_then(|b| b.entries.get(*key))
                    .map(|e| e.text.as_str()),
            };
            let merged = analysis.annotate_entry(analyzers, &context);
            let annotated = args.annotate.then(|| ((*key).clone(), merged));
            (analysis.diagnostics, annotated)
        })
        .collect();
    let mut diagnostics = Vec::new();
    let mut annotated = Vec::new();
    for (entry_diagnostics, entry_annotated) in analyzed {
        diagnostics.extend(entry_diagnostics);
        if let Some(entry_annotated) = entry_annotated {
            annotated.push(entry_annotated);
        }
    }
    (file.path.clone(), diagnostics, annotated)
}

/// Load the baseline database: a directory of locale files, or one file.
fn load_baseline(path: &Path) -> HashMap<String, LocaleFile> {
    let paths = if path.is_dir() {
        find_locale_files(&[PathBuf::from(path)])
    } else {
        vec![PathBuf::from(path)]
    };
    let mut baseline = HashMap::new();
    for path in paths {
        match LocaleFile::load(&path) {
            Ok(file) => {
                baseline.insert(file.locale.clone(), file);
            }
            Err(err) => {
                eprintln!("{}: {err}", "Warning".yellow());
            }
        }
    }
    baseline
}

/// Display the settings used to check files.
fn display_settings(args: &args::CheckArgs, config: &Config, analyzers: &Analyzers) {
    if args.quiet || !args.show_settings {
        return;
    }
    println!("Configuration:");
    let analyzer_names = analyzers
        .enabled
        .iter()
        .map(|a| a.name())
        .collect::<Vec<&str>>()
        .join(", ");
    println!(
        "  Analyzers enabled: {}",
        if analyzer_names.is_empty() {
            "<none>".to_string()
        } else {
            analyzer_names
        }
    );
    println!("  Source locale: {}", config.locales.source);
    println!(
        "  Known locales: {}",
        if config.locales.codes.is_empty() {
            "<any>".to_string()
        } else {
            config.locales.codes.join(", ")
        }
    );
    println!("  Output format: {}", args.output);
}

/// Check and display result for all locale database files.
pub fn run_check(args: &args::CheckArgs) -> i32 {
    let start = Instant::now();
    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}: {err}", "Error".bright_red().bold());
            return 1;
        }
    };
    let analyzers = match get_selected_analyzers(args) {
        Ok(analyzers) => analyzers,
        Err(err) => {
            eprintln!("{}: {err}", "Error".bright_red().bold());
            return 1;
        }
    };
    display_settings(args, &config, &analyzers);
    let mut load_errors: Vec<CheckResult> = Vec::new();
    let mut locale_files: Vec<LocaleFile> = Vec::new();
    for path in find_locale_files(&args.files) {
        match LocaleFile::load(&path) {
            Ok(file) if config.locales.is_known(&file.locale) => locale_files.push(file),
            Ok(file) => load_errors.push((
                path.clone(),
                vec![Diagnostic::new(
                    &path,
                    "",
                    "unknown-locale",
                    Severity::Warning,
                    format!("unknown locale '{}', file skipped", file.locale),
                )],
                vec![],
            )),
            Err(err) => load_errors.push((
                path.clone(),
                vec![Diagnostic::new(
                    &path,
                    "",
                    "read-error",
                    Severity::Error,
                    err.to_string(),
                )],
                vec![],
            )),
        }
    }
    let glossary = args.glossary.as_deref().and_then(|path| {
        match Glossary::load(path, &config) {
            Ok(glossary) => Some(glossary),
            Err(err) => {
                eprintln!("{}: {err}, glossary analyzer ignored", "Warning".yellow());
                None
            }
        }
    });
    let baseline = args.baseline.as_deref().map(load_baseline);
    let source = locale_files
        .iter()
        .find(|file| file.locale == config.locales.source);
    let cancel = AtomicBool::new(false);
    let mut result: Vec<CheckResult> = locale_files
        .par_iter()
        .map(|file| {
            check_file(
                file,
                args,
                &config,
                &analyzers,
                glossary.as_ref(),
                source,
                baseline.as_ref().and_then(|b| b.get(&file.locale)),
                &cancel,
            )
        })
        .collect();
    result.extend(load_errors);
    let elapsed = start.elapsed();
    display_result(&result, args, &elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::analyzer::get_all_analyzers;
    use crate::db::DbEntry;

    fn locale_file(locale: &str, entries: &[(&str, &str)]) -> LocaleFile {
        LocaleFile {
            path: PathBuf::from(format!("{locale}.json")),
            locale: locale.to_string(),
            entries: entries
                .iter()
                .map(|(key, text)| {
                    (
                        (*key).to_string(),
                        DbEntry {
                            text: (*text).to_string(),
                            kind: None,
                        },
                    )
                })
                .collect(),
        }
    }

    fn check_args() -> args::CheckArgs {
        args::CheckArgs {
            files: vec![],
            show_settings: false,
            config: None,
            glossary: None,
            baseline: None,
            filter: None,
            select: None,
            ignore: None,
            severity: vec![],
            annotate: false,
            no_errors: false,
            sort: args::CheckSort::default(),
            file_status: false,
            output: args::OutputFormat::default(),
            quiet: false,
        }
    }

    #[test]
    fn test_check_file_cross_locale_tags() {
        let config: Config = toml::from_str("[tags]\nneed_closing = [\"b\"]\n").unwrap();
        let analyzers = Analyzers::new(get_all_analyzers());
        let source = locale_file("en", &[("greeting", "{b}Hello{/b}")]);
        let target = locale_file("de", &[("greeting", "Hallo")]);
        let (_, diagnostics, _) = check_file(
            &target,
            &check_args(),
            &config,
            &analyzers,
            None,
            Some(&source),
            None,
            &AtomicBool::new(false),
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].analyzer, "tags");
        assert_eq!(diagnostics[0].key, "greeting");
        assert_eq!(diagnostics[0].message, "inconsistent markup tags");
    }

    #[test]
    fn test_check_file_source_locale_itself() {
        // The source file is never compared against itself.
        let config: Config = toml::from_str("[tags]\nneed_closing = [\"b\"]\n").unwrap();
        let analyzers = Analyzers::new(get_all_analyzers());
        let source = locale_file("en", &[("greeting", "{b}Hello{/b}")]);
        let (_, diagnostics, _) = check_file(
            &source,
            &check_args(),
            &config,
            &analyzers,
            None,
            Some(&source),
            None,
            &AtomicBool::new(false),
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_check_file_cancelled() {
        // Without cancellation this entry would report an unclosed tag.
        let config: Config = toml::from_str("[tags]\nneed_closing = [\"b\"]\n").unwrap();
        let analyzers = Analyzers::new(get_all_analyzers());
        let file = locale_file("en", &[("greeting", "{b}unclosed")]);
        let (_, diagnostics, _) = check_file(
            &file,
            &check_args(),
            &config,
            &analyzers,
            None,
            None,
            None,
            &AtomicBool::new(true),
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_check_file_annotate() {
        let config = Config::default();
        let analyzers = Analyzers::new(get_all_analyzers());
        let file = locale_file("en", &[("a", "one"), ("b", "two")]);
        let mut args = check_args();
        args.annotate = true;
        let (_, _, annotated) = check_file(
            &file,
            &args,
            &config,
            &analyzers,
            None,
            None,
            None,
            &AtomicBool::new(false),
        );
        let keys: Vec<&str> = annotated.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(annotated[0].1.to_string(), "one");
    }

    #[test]
    fn test_baseline_diff_through_pipeline() {
        let config = Config::default();
        let analyzers = Analyzers::new(get_all_analyzers());
        let file = locale_file("en", &[("greeting", "Hello world")]);
        let baseline = locale_file("en", &[("greeting", "Hello old world")]);
        let (_, diagnostics, _) = check_file(
            &file,
            &check_args(),
            &config,
            &analyzers,
            None,
            None,
            Some(&baseline),
            &AtomicBool::new(false),
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].analyzer, "diff");
        assert_eq!(diagnostics[0].message, "text changed since baseline");
    }
}
