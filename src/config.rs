// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loaded from a `locexam.toml` file.
//!
//! Everything has a working default: the file is optional, and an explicitly
//! given path that cannot be read or parsed is an error.

use std::{
    collections::{HashMap, HashSet},
    error::Error,
    path::Path,
};

use serde::Deserialize;

/// Default characters treated as word boundaries by the glossary matcher.
pub const DEFAULT_BOUNDARY_CHARS: &str = " \t\r\n.,;:!?…\"'()[]{}<>«»/\\+*=|~&";

/// Default configuration file name, looked up in the current directory.
const CONFIG_FILE_NAME: &str = "locexam.toml";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tags: TagConfig,
    /// Character limits per string kind; the `default` key applies to
    /// entries without a kind. Absent kind means unlimited.
    pub limits: HashMap<String, usize>,
    pub glossary: GlossaryConfig,
    pub locales: LocaleConfig,
}

/// Tag names driving the pairing and comparison of markup tags.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagConfig {
    /// Names whose opening tags must be closed (e.g. `b`, `g`); other names
    /// are single markers exempt from pairing.
    pub need_closing: HashSet<String>,
    /// Names skipped by the cross-locale mismatch comparison.
    pub ignore_mismatched: HashSet<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlossaryConfig {
    /// Characters accepted as word boundaries around glossary terms.
    pub boundary_chars: String,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            boundary_chars: DEFAULT_BOUNDARY_CHARS.to_string(),
        }
    }
}

/// The registry of known locales, passed explicitly to everything that needs
/// it instead of living in a global.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleConfig {
    /// The reference locale other locales are compared against.
    pub source: String,
    /// Known locale codes; an empty list accepts any locale found on disk.
    pub codes: Vec<String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            source: "en".to_string(),
            codes: vec![],
        }
    }
}

impl LocaleConfig {
    /// Return `true` if the given locale code is in the registry.
    #[must_use]
    pub fn is_known(&self, locale: &str) -> bool {
        self.codes.is_empty() || self.codes.iter().any(|code| code == locale)
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// With an explicit path, read errors and parse errors are fatal. With
    /// no path, `locexam.toml` is used when present in the current
    /// directory, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(CONFIG_FILE_NAME);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(path)
            .map_err(|err| format!("could not read {}: {err}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .map_err(|err| format!("could not parse {}: {err}", path.display()))?;
        Ok(config)
    }

    /// Get the character limit for a string kind, if any.
    #[must_use]
    pub fn limit_for(&self, kind: Option<&str>) -> Option<usize> {
        self.limits.get(kind.unwrap_or("default")).copied()
    }
}
