// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Glossary terms: template compilation, text matching and the per-entry
//! match cache.

pub mod matcher;
pub mod store;
pub mod template;
