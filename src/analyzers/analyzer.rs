// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashSet;

use crate::{
    analyze::{Analysis, EntryContext},
    analyzers::{diff, filter, glossary, length, tags},
    args,
    diagnostic::Severity,
    inline::run::RunSequence,
};

pub type Analyzer = Box<dyn EntryAnalyzer + Sync>;

#[derive(Default)]
pub struct Analyzers {
    pub enabled: Vec<Analyzer>,
}

impl std::fmt::Display for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name(), self.severity())
    }
}

impl Analyzers {
    #[must_use]
    pub fn new(enabled: Vec<Analyzer>) -> Self {
        Self { enabled }
    }
}

/// One analysis pass over a locale entry.
///
/// An analyzer reports diagnostics through the [`Analysis`] and returns its
/// own styled runs over the entry text (or `None` when it does not apply);
/// the caller merges the runs of every stage into one sequence.
pub trait EntryAnalyzer {
    fn name(&self) -> &'static str;
    fn is_default(&self) -> bool;
    fn severity(&self) -> Severity;
    fn annotate(&self, _analysis: &mut Analysis, _entry: &EntryContext) -> Option<RunSequence> {
        None
    }
}

/// All analyzers, in pipeline order.
///
/// The order matters: each stage's merge uses the accumulated result of the
/// previous stages as its left operand.
#[must_use]
pub fn get_all_analyzers() -> Vec<Analyzer> {
    vec![
        Box::new(tags::TagsAnalyzer {}),
        Box::new(diff::DiffAnalyzer {}),
        Box::new(glossary::GlossaryAnalyzer {}),
        Box::new(length::LengthAnalyzer {}),
        Box::new(filter::FilterAnalyzer {}),
    ]
}

/// Get unknown analyzer names from a list of names compared to all available analyzers.
#[must_use]
pub fn get_unknown_analyzers<'a>(
    names: &'a [&str],
    all_names: &HashSet<&'static str>,
) -> Vec<&'a str> {
    let selected_names = names.iter().copied().collect::<HashSet<_>>();
    let mut unknown_names: HashSet<&str> = selected_names.difference(all_names).copied().collect();
    // The special name "all" is always known, we just ignore it.
    unknown_names.remove(&"all");
    if unknown_names.is_empty() {
        return vec![];
    }
    let mut unknown = unknown_names.iter().copied().collect::<Vec<_>>();
    unknown.sort_unstable();
    unknown
}

/// Get the selected analyzers based on command line parameters `--select` and `--ignore`.
///
/// If `--select` is provided, only the specified analyzers are included.
/// If `--select` is not provided, all default analyzers are included.
/// Then, any analyzers specified in `--ignore` are removed from the selection.
/// The pipeline order is preserved whatever the selection.
pub fn get_selected_analyzers(
    args: &args::CheckArgs,
) -> Result<Analyzers, Box<dyn std::error::Error>> {
    let all_severities = args.severity.is_empty();
    let all_analyzers: Vec<Analyzer> = get_all_analyzers()
        .into_iter()
        .filter(|a| all_severities || args.severity.contains(&a.severity()))
        .collect();
    let all_names: HashSet<&'static str> = all_analyzers.iter().map(|a| a.name()).collect();
    let mut selected: Vec<Analyzer> = Vec::new();

    if let Some(select_str) = &args.select {
        let names: Vec<&str> = select_str.split(',').map(str::trim).collect();
        let unknown_names = get_unknown_analyzers(&names, &all_names);
        if !unknown_names.is_empty() {
            return Err(format!("unknown selected analyzers: {}", unknown_names.join(", ")).into());
        }
        if names.contains(&"all") {
            selected = all_analyzers;
        } else {
            for analyzer in all_analyzers {
                if names.contains(&analyzer.name()) {
                    selected.push(analyzer);
                }
            }
        }
    } else {
        // If no selection was provided, start with all default analyzers.
        for analyzer in all_analyzers {
            if analyzer.is_default() {
                selected.push(analyzer);
            }
        }
    }

    // Remove the ignored analyzers.
    if let Some(ignore_str) = &args.ignore {
        let names: Vec<&str> = ignore_str.split(',').map(str::trim).collect();
        let unknown_names = get_unknown_analyzers(&names, &all_names);
        if !unknown_names.is_empty() {
            return Err(format!(
                "unknown analyzers to ignore: {}",
                unknown_names.join(", ")
            )
            .into());
        }
        selected.retain(|analyzer| !names.contains(&analyzer.name()));
    }

    Ok(Analyzers::new(selected))
}

/// Display analyzers used to check locale files.
pub fn run_analyzers(_args: &args::AnalyzersArgs) -> i32 {
    let analyzers = get_all_analyzers();
    let default_analyzers: Vec<&Analyzer> = analyzers.iter().filter(|a| a.is_default()).collect();
    let other_analyzers: Vec<&Analyzer> = analyzers.iter().filter(|a| !a.is_default()).collect();
    if default_analyzers.is_empty() {
        println!("No default analyzers.");
    } else {
        println!("{} default analyzers:", default_analyzers.len());
        for analyzer in &default_analyzers {
            println!("  {analyzer}");
        }
    }
    if other_analyzers.is_empty() {
        println!("No other analyzers.");
    } else {
        println!("{} other analyzers:", other_analyzers.len());
        for analyzer in &other_analyzers {
            println!("  {analyzer}");
        }
    }
    println!(
        "Total: {} analyzers",
        default_analyzers.len() + other_analyzers.len()
    );
    0
}
