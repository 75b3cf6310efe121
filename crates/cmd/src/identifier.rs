// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Safe SQL identifiers
//!
//! Table names are interpolated into generated SQL (`DESCRIBE`, preview
//! `SELECT`). Only names matching [`SAFE_IDENTIFIER_PATTERN`] may be used there.

use regex::Regex;
use std::sync::LazyLock;

pub const SAFE_IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

static SAFE_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SAFE_IDENTIFIER_PATTERN).expect("identifier pattern is valid"));

pub fn is_safe_identifier(name: &str) -> bool {
    SAFE_IDENTIFIER.is_match(name)
}

/// Double-quote a name for use in generated SQL, `None` if it is not safe
pub fn quote_identifier(name: &str) -> Option<String> {
    is_safe_identifier(name).then(|| format!("\"{}\"", name))
}
