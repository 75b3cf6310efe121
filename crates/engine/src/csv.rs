// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! CSV reader options
//!
//! Mirrors the subset of DataFusion's `CsvReadOptions` the loader exposes.
//! Every CSV is read with the header row as column names and column types
//! inferred from a sample of the content.

use crate::{Error, Result};
use datafusion::prelude::CsvReadOptions;
use serde::{Deserialize, Serialize};

/// CSV format options, deserialized from the `csv:` section of the config file
///
/// All fields have defaults, so an empty section (or none) reads plain
/// comma-separated files with a header row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Whether the first row holds column names (default: true)
    #[serde(default = "default_has_header")]
    pub has_header: bool,

    /// Number of rows sampled for type inference (default: 1000)
    #[serde(default = "default_schema_infer_max_records")]
    pub schema_infer_max_records: usize,
}

fn default_delimiter() -> char {
    ','
}
fn default_has_header() -> bool {
    true
}
fn default_schema_infer_max_records() -> usize {
    1000
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            has_header: default_has_header(),
            schema_infer_max_records: default_schema_infer_max_records(),
        }
    }
}

impl CsvOptions {
    /// Reject options the CSV reader cannot honour
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            return Err(Error::InvalidOption(format!(
                "CSV delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        if self.schema_infer_max_records == 0 {
            return Err(Error::InvalidOption(
                "schema_infer_max_records must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Build DataFusion read options
    pub fn read_options(&self) -> Result<CsvReadOptions<'static>> {
        self.validate()?;
        Ok(CsvReadOptions::new()
            .has_header(self.has_header)
            .delimiter(self.delimiter as u8)
            .schema_infer_max_records(self.schema_infer_max_records))
    }
}
