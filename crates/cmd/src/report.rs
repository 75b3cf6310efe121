// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Prefixed status lines for the user-facing report
//!
//! These go to the report writer (stdout in the binary), not to the log.

use std::fmt::Display;
use std::io::{self, Write};

pub fn info(out: &mut dyn Write, message: impl Display) -> io::Result<()> {
    writeln!(out, "[INFO] {}", message)
}

pub fn warn(out: &mut dyn Write, message: impl Display) -> io::Result<()> {
    log::debug!("reported warning: {}", message);
    writeln!(out, "[WARN] {}", message)
}

pub fn error(out: &mut dyn Write, message: impl Display) -> io::Result<()> {
    writeln!(out, "[ERROR] {}", message)
}
