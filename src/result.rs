// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display check result.

use std::{path::PathBuf, time::Duration};

use colored::Colorize;

use crate::{
    analyze::CheckResult,
    args,
    diagnostic::{Diagnostic, Severity},
    render::ansi,
};

/// Display diagnostics in human format.
fn display_diagnostics_human(result: &[CheckResult], args: &args::CheckArgs) {
    let mut diags: Vec<&Diagnostic> = result.iter().flat_map(|x| &x.1).collect();
    match args.sort {
        args::CheckSort::Path => {
            diags.sort_by_key(|diag| (diag.path.as_path(), diag.key.as_str()));
        }
        args::CheckSort::Key => {
            diags.sort_by_key(|diag| (diag.key.as_str(), diag.path.as_path()));
        }
        args::CheckSort::Analyzer => {
            diags.sort_by_key(|diag| (diag.analyzer, diag.path.as_path(), diag.key.as_str()));
        }
    }
    for diag in diags {
        println!("{diag}");
    }
}

/// Display the merged annotated text of every entry checked.
fn display_annotations(result: &[CheckResult]) {
    for (path, _, annotated) in result {
        if annotated.is_empty() {
            continue;
        }
        println!("{}", path.display().to_string().white().bold());
        for (key, runs) in annotated {
            println!("{} {}", format!("{key:>24} |").cyan(), ansi(runs));
        }
    }
}

/// Display file statistics.
fn display_file_status(file_errors: &[(PathBuf, usize, usize, usize)]) {
    for (filename, info, warnings, errors) in file_errors {
        if errors + warnings + info == 0 {
            println!("{}: all OK!", filename.display());
        } else {
            println!(
                "{}: {} problems ({} errors, {} warnings, {} info)",
                filename.display(),
                errors + warnings + info,
                errors,
                warnings,
                info,
            );
        }
    }
}

/// Display diagnostics in JSON format.
fn display_diagnostics_json(result: &[CheckResult]) {
    let diags: Vec<&Diagnostic> = result.iter().flat_map(|x| &x.1).collect();
    println!("{}", serde_json::to_string(&diags).unwrap_or_default());
}

/// Display the result of the checks and return the appropriate exit code.
pub fn display_result(result: &[CheckResult], args: &args::CheckArgs, elapsed: &Duration) -> i32 {
    let mut files_checked = 0;
    let mut files_with_errors = 0;
    let mut count_info = 0;
    let mut count_warnings = 0;
    let mut count_errors = 0;
    let mut file_errors: Vec<(PathBuf, usize, usize, usize)> = Vec::new();
    for (filename, errors, _) in result {
        let mut count_file_info = 0;
        let mut count_file_warnings = 0;
        let mut count_file_errors = 0;
        files_checked += 1;
        if !errors.is_empty() {
            files_with_errors += 1;
            for error in errors {
                match error.severity {
                    Severity::Info => {
                        count_info += 1;
                        count_file_info += 1;
                    }
                    Severity::Warning => {
                        count_warnings += 1;
                        count_file_warnings += 1;
                    }
                    Severity::Error => {
                        count_errors += 1;
                        count_file_errors += 1;
                    }
                }
            }
        }
        if args.file_status {
            file_errors.push((
                filename.clone(),
                count_file_info,
                count_file_warnings,
                count_file_errors,
            ));
        }
    }
    if !args.quiet {
        match args.output {
            args::OutputFormat::Human => {
                if !args.no_errors {
                    display_diagnostics_human(result, args);
                }
                if args.annotate {
                    display_annotations(result);
                }
                if args.file_status {
                    file_errors.sort();
                    display_file_status(&file_errors);
                }
            }
            args::OutputFormat::Json => {
                if !args.no_errors {
                    display_diagnostics_json(result);
                }
            }
        }
    }
    if files_with_errors == 0 {
        if !args.quiet && args.output == args::OutputFormat::Human {
            if files_checked > 0 {
                println!("{files_checked} files checked: all OK! [{elapsed:?}]");
            } else {
                println!("No files checked [{elapsed:?}]");
            }
        }
        0
    } else {
        if !args.quiet && args.output == args::OutputFormat::Human {
            println!(
                "{files_checked} files checked: \
                {} problems \
                in {files_with_errors} files \
                ({count_errors} errors, \
                {count_warnings} warnings, \
                {count_info} info) \
                [{elapsed:?}]",
                count_errors + count_warnings + count_info
            );
        }
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn quiet_args() -> args::CheckArgs {
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
            quiet: true,
        }
    }

    #[test]
    fn test_exit_code_ok() {
        let result: Vec<CheckResult> = vec![(PathBuf::from("en.json"), vec![], vec![])];
        let rc = display_result(&result, &quiet_args(), &Duration::from_millis(1));
        assert_eq!(rc, 0);
    }

    #[test]
    fn test_exit_code_errors() {
        let diag = Diagnostic::new(
            Path::new("de.json"),
            "key",
            "tags",
            Severity::Error,
            "unpaired or misordered tags (1)".to_string(),
        );
        let result: Vec<CheckResult> = vec![(PathBuf::from("de.json"), vec![diag], vec![])];
        let rc = display_result(&result, &quiet_args(), &Duration::from_millis(1));
        assert_eq!(rc, 1);
    }

    #[test]
    fn test_exit_code_no_files() {
        let result: Vec<CheckResult> = vec![];
        let rc = display_result(&result, &quiet_args(), &Duration::from_millis(1));
        assert_eq!(rc, 0);
    }
}
