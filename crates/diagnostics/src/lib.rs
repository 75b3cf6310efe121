// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Logging setup shared by the csvsql crates
//!
//! Diagnostic logs go to stderr through the `log` facade, so DataFusion's own
//! log records are filtered by the same level.
//!
//! Usage:
//! - CSVSQL_LOG unset (default) - warnings and errors only
//! - Set CSVSQL_LOG=off - no logs
//! - Set CSVSQL_LOG=info - basic operation logs
//! - Set CSVSQL_LOG=debug - detailed diagnostic logs

use std::str::FromStr;
use std::sync::Once;

use log::LevelFilter;

// Re-export log so macros can use it
pub use log;

/// Environment variable holding the log level
pub const LOG_ENV: &str = "CSVSQL_LOG";

/// Level used when CSVSQL_LOG is unset or unparseable
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

static INIT: Once = Once::new();

/// Parse a CSVSQL_LOG value (`off`, `error`, `warn`, `info`, `debug`, `trace`)
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(value.trim()).ok()
}

/// Initialize diagnostics based on the CSVSQL_LOG environment variable
///
/// This should be called once at application startup. It's safe to call
/// multiple times - subsequent calls will be ignored.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let level = match std::env::var(LOG_ENV) {
            Err(_) => DEFAULT_LEVEL,
            Ok(value) => match parse_level(&value) {
                Some(level) => level,
                None => {
                    // Logger is not up yet, so this one goes straight to stderr
                    eprintln!("Warning: Unknown {LOG_ENV} value '{value}', using 'warn'");
                    DEFAULT_LEVEL
                }
            },
        };

        // A test harness may already have installed a logger
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .target(env_logger::Target::Stderr)
            .try_init();
    });
}

/// Log basic operations (registrations, statements executed, etc.)
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log::info!($($arg)*)
    };
}

/// Log detailed diagnostics (generated SQL, option values, internal state)
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log::debug!($($arg)*)
    };
}

/// Log warning conditions (fallbacks, recoverable errors)
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log::warn!($($arg)*)
    };
}

/// Log critical error conditions
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log::error!($($arg)*)
    };
}

/// Re-export the init function for convenience
pub use init_diagnostics as init;
