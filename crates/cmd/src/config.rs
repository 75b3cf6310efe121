// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Run configuration
//!
//! Built-in defaults, then an optional YAML file, then environment variables,
//! then command-line flags. With no file, variables, or flags the program
//! reads `data/*.csv` and runs `queries.sql`.

use anyhow::{Context, Result};
use clap::Parser;
use engine::{CsvOptions, DEFAULT_APP_NAME, SessionBuilder};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "CSVSQL_CONFIG";
pub const DATA_DIR_ENV: &str = "CSVSQL_DATA_DIR";
pub const QUERIES_ENV: &str = "CSVSQL_QUERIES";

/// Load CSV files as SQL tables and run a script of queries against them
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
#[command(name = "csvsql")]
pub struct Cli {
    /// YAML configuration file (overrides CSVSQL_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory scanned for *.csv files (overrides CSVSQL_DATA_DIR)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// File of ;-separated SQL statements (overrides CSVSQL_QUERIES)
    #[arg(long)]
    pub queries: Option<PathBuf>,

    /// Session application name
    #[arg(long)]
    pub app_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_queries")]
    pub queries: PathBuf,

    /// Execution partitions, 0 for one per core
    #[serde(default)]
    pub target_partitions: usize,

    #[serde(default = "default_eager_eval")]
    pub eager_eval: bool,

    /// Rows shown in each table preview
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    /// Rows shown for a statement result
    #[serde(default = "default_max_display_rows")]
    pub max_display_rows: usize,

    /// Characters of each statement echoed before it runs
    #[serde(default = "default_statement_preview_chars")]
    pub statement_preview_chars: usize,

    #[serde(default)]
    pub csv: CsvOptions,
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_queries() -> PathBuf {
    PathBuf::from("queries.sql")
}
fn default_eager_eval() -> bool {
    true
}
fn default_preview_rows() -> usize {
    5
}
fn default_max_display_rows() -> usize {
    20
}
fn default_statement_preview_chars() -> usize {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            data_dir: default_data_dir(),
            queries: default_queries(),
            target_partitions: 0,
            eager_eval: default_eager_eval(),
            preview_rows: default_preview_rows(),
            max_display_rows: default_max_display_rows(),
            statement_preview_chars: default_statement_preview_chars(),
            csv: CsvOptions::default(),
        }
    }
}

/// Use the override if given, otherwise the environment variable if set
pub fn path_with_override(override_path: Option<&Path>, var: &str) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path.to_path_buf());
    }
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

impl Config {
    /// Resolve the configuration for one run
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match path_with_override(cli.config.as_deref(), CONFIG_ENV) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(data_dir) = path_with_override(cli.data_dir.as_deref(), DATA_DIR_ENV) {
            config.data_dir = data_dir;
        }
        if let Some(queries) = path_with_override(cli.queries.as_deref(), QUERIES_ENV) {
            config.queries = queries;
        }
        if let Some(app_name) = &cli.app_name {
            config.app_name = app_name.clone();
        }

        config.validate()?;
        log::debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml_ng::from_str(content)
            .with_context(|| "Failed to parse YAML configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            anyhow::bail!("app_name cannot be empty");
        }
        if self.preview_rows == 0 {
            anyhow::bail!("preview_rows must be greater than 0");
        }
        if self.max_display_rows == 0 {
            anyhow::bail!("max_display_rows must be greater than 0");
        }
        if self.statement_preview_chars == 0 {
            anyhow::bail!("statement_preview_chars must be greater than 0");
        }
        self.csv.validate()?;
        Ok(())
    }

    pub fn session_builder(&self) -> SessionBuilder {
        SessionBuilder::new()
            .app_name(self.app_name.clone())
            .target_partitions(self.target_partitions)
            .eager_eval(self.eager_eval)
    }
}
