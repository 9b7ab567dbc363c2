// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Game markup tags: tokenization, extraction and open/close pairing.

pub mod list;
pub mod scan;
