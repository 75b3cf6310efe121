// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! The SQL engine seam used by csvsql
//!
//! Everything the command layer needs from a SQL engine goes through
//! [`SqlEngine`]. [`DataFusionEngine`] is the production implementation;
//! tests substitute doubles that record calls and return canned results.

pub mod catalog;
pub mod csv;
mod error;
pub mod result;
pub mod session;

pub use catalog::{DEFAULT_NAMESPACE, ViewInfo, ViewKind};
pub use csv::CsvOptions;
pub use error::{Error, Result};
pub use result::{QueryResult, render_batches};
pub use session::{DEFAULT_APP_NAME, DataFusionEngine, SessionBuilder};

use async_trait::async_trait;
use std::path::Path;

/// Operations the orchestration layer drives
#[async_trait]
pub trait SqlEngine: Send + Sync {
    /// Name the session was created under
    fn app_name(&self) -> &str;

    /// Read a CSV file and register it under `name`, replacing any
    /// existing table of the same name
    ///
    /// Returns the name as stored in the catalogue.
    async fn register_csv(&self, name: &str, path: &Path, options: &CsvOptions)
    -> Result<String>;

    /// Views in the session's default namespace, sorted by name
    async fn list_views(&self) -> Result<Vec<ViewInfo>>;

    /// Execute one SQL statement
    async fn sql(&self, statement: &str) -> Result<QueryResult>;

    /// Release the session; later calls fail with [`Error::SessionStopped`]
    async fn stop(&self) -> Result<()>;
}
