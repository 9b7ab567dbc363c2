// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Locale database files.
//!
//! One JSON file per locale, named `<locale>.json`, mapping a string key to
//! either a bare string or an object with the text and an optional kind
//! (the kind selects a length limit from the configuration).

use std::{collections::BTreeMap, error::Error, path::Path, path::PathBuf};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Text(String),
    Full {
        text: String,
        #[serde(default)]
        kind: Option<String>,
    },
}

/// One localized string of the database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbEntry {
    pub text: String,
    pub kind: Option<String>,
}

/// All entries of one locale, loaded from one file.
#[derive(Clone, Debug, Default)]
pub struct LocaleFile {
    pub path: PathBuf,
    pub locale: String,
    pub entries: BTreeMap<String, DbEntry>,
}

impl LocaleFile {
    /// Load a locale file; the file stem is the locale code.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let Some(locale) = path.file_stem().and_then(|stem| stem.to_str()) else {
            return Err(format!("could not determine locale from {}", path.display()).into());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|err| format!("could not read {}: {err}", path.display()))?;
        Self::parse(&content, locale, path)
    }

    /// Parse the JSON content of a locale file.
    pub fn parse(content: &str, locale: &str, path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw: BTreeMap<String, RawEntry> = serde_json::from_str(content)
            .map_err(|err| format!("could not parse {}: {err}", path.display()))?;
        let entries = raw
            .into_iter()
            .map(|(key, entry)| {
                let entry = match entry {
                    RawEntry::Text(text) => DbEntry { text, kind: None },
                    RawEntry::Full { text, kind } => DbEntry { text, kind },
                };
                (key, entry)
            })
            .collect();
        Ok(Self {
            path: PathBuf::from(path),
            locale: locale.to_string(),
            entries,
        })
    }
}
