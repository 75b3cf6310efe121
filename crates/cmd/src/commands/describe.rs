// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use engine::SqlEngine;
use log::debug;
use std::io::Write;

use crate::identifier::quote_identifier;
use crate::report;

/// Print the schema and the first `preview_rows` rows of every view
///
/// View names come from the catalogue, but each one is checked again before
/// it is placed into generated SQL.
pub async fn describe_tables(
    engine: &dyn SqlEngine,
    preview_rows: usize,
    out: &mut dyn Write,
) -> Result<()> {
    for view in engine.list_views().await? {
        let name = &view.name;
        let Some(quoted) = quote_identifier(name) else {
            report::warn(
                out,
                format!("Skipping DESCRIBE for unexpected table name: {:?}", name),
            )?;
            continue;
        };

        let describe_sql = format!("DESCRIBE {}", quoted);
        debug!("describe_tables: {describe_sql}");
        writeln!(out, "\n--- Schema: {} ---", name)?;
        let schema = engine
            .sql(&describe_sql)
            .await
            .with_context(|| format!("Failed to describe table '{}'", name))?
            .show(usize::MAX)
            .await?;
        writeln!(out, "{}", schema)?;

        let preview_sql = format!("SELECT * FROM {} LIMIT {}", quoted, preview_rows);
        debug!("describe_tables: {preview_sql}");
        writeln!(
            out,
            "--- Preview: {} (first {} rows) ---",
            name, preview_rows
        )?;
        let preview = engine
            .sql(&preview_sql)
            .await
            .with_context(|| format!("Failed to preview table '{}'", name))?
            .show(preview_rows)
            .await?;
        writeln!(out, "{}", preview)?;
    }
    Ok(())
}
