// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod commands;
pub mod config;
pub mod identifier;
pub mod report;
pub mod script;

use anyhow::{Context, Result};
use engine::SqlEngine;
use std::io::Write;

use crate::commands::{RunOptions, RunSummary};
use crate::config::Config;

/// Load the data directory, print the catalogue and table previews, then
/// run the query script
pub async fn run_pipeline(
    engine: &dyn SqlEngine,
    config: &Config,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    commands::load_csv_files(engine, &config.data_dir, &config.csv, out).await?;
    commands::show_tables(engine, out).await?;
    commands::describe_tables(engine, config.preview_rows, out).await?;
    commands::run_sql_file(engine, &config.queries, &RunOptions::from(config), out).await
}

/// Run the pipeline, flush the output, then stop the session
///
/// The session is stopped even when the pipeline or the flush failed.
/// Errors are reported in that order: pipeline, flush, stop.
pub async fn run_session(
    engine: &dyn SqlEngine,
    config: &Config,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    let result = run_pipeline(engine, config, out).await;
    let flushed = out.flush();
    let stopped = engine.stop().await;

    let summary = result?;
    flushed.context("Failed to flush output")?;
    stopped.with_context(|| format!("Failed to stop session '{}'", engine.app_name()))?;
    Ok(summary)
}
