// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use engine::SqlEngine;
use log::debug;
use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::report;
use crate::script::{preview, split_statements};

/// Display settings for a script run
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub statement_preview_chars: usize,
    pub max_display_rows: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RunOptions {
    fn from(config: &Config) -> Self {
        Self {
            statement_preview_chars: config.statement_preview_chars,
            max_display_rows: config.max_display_rows,
        }
    }
}

/// Statement counts for one script run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Execute every statement in `sql_file` in order
///
/// A failing statement is reported and the run moves on to the next one.
/// A missing file or a file without statements is reported, not an error.
pub async fn run_sql_file(
    engine: &dyn SqlEngine,
    sql_file: &Path,
    options: &RunOptions,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    if !sql_file.is_file() {
        report::warn(out, format!("SQL file not found: {}", sql_file.display()))?;
        return Ok(summary);
    }

    let content = std::fs::read_to_string(sql_file)
        .with_context(|| format!("Failed to read SQL file: {}", sql_file.display()))?;

    let statements = split_statements(&content);
    if statements.is_empty() {
        report::info(
            out,
            format!(
                "No executable statements found in '{}'.",
                sql_file.display()
            ),
        )?;
        return Ok(summary);
    }

    writeln!(out, "\n=== Running {} ===", sql_file.display())?;
    for statement in &statements {
        writeln!(
            out,
            "\n> {}",
            preview(statement, options.statement_preview_chars)
        )?;
        summary.executed += 1;

        match execute_statement(engine, statement, options.max_display_rows).await {
            Ok(Some(table)) => writeln!(out, "{}", table)?,
            Ok(None) => {}
            Err(e) => {
                summary.failed += 1;
                debug!("Statement failed ({}): {}", e.kind(), e);
                report::error(out, &e)?;
            }
        }
    }
    writeln!(out, "=== Done: {} ===\n", sql_file.display())?;

    debug!(
        "Ran {} statements from {}, {} failed",
        summary.executed,
        sql_file.display(),
        summary.failed
    );
    Ok(summary)
}

/// Run one statement, returning the rendered table when it produces columns
async fn execute_statement(
    engine: &dyn SqlEngine,
    statement: &str,
    max_display_rows: usize,
) -> engine::Result<Option<String>> {
    let result = engine.sql(statement).await?;
    if result.columns().is_empty() {
        // A lazy session has not executed the statement yet
        if result.is_deferred() {
            _ = result.collect().await?;
        }
        return Ok(None);
    }
    Ok(Some(result.show(max_display_rows).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::SessionBuilder;
    use std::fs;
    use tempfile::TempDir;

    async fn run_script(script: &str, eager_eval: bool) -> Result<(RunSummary, String)> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("queries.sql");
        fs::write(&path, script)?;

        let engine = SessionBuilder::new()
            .target_partitions(1)
            .eager_eval(eager_eval)
            .build()?;
        let mut out = Vec::new();
        let summary = run_sql_file(engine.as_ref(), &path, &RunOptions::default(), &mut out).await?;
        Ok((summary, String::from_utf8(out)?))
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_batch() -> Result<()> {
        let (summary, output) =
            run_script("SELECT * FROM no_such_table;\nSELECT 41 + 1 AS answer;", true).await?;

        assert_eq!(summary, RunSummary { executed: 2, failed: 1 });
        let error_at = output.find("[ERROR]").expect("error reported");
        let answer_at = output.find("| 42 ").expect("second statement shown");
        assert!(error_at < answer_at);
        assert!(output.contains("no_such_table"));
        Ok(())
    }

    #[tokio::test]
    async fn test_banners_and_ddl_without_output() -> Result<()> {
        let (summary, output) = run_script(
            "CREATE VIEW v AS SELECT 1 AS x;\n-- just a note\n;\nSELECT x FROM v;",
            true,
        )
        .await?;

        assert_eq!(summary, RunSummary { executed: 2, failed: 0 });
        assert!(output.contains("=== Running "));
        assert!(output.contains("=== Done: "));
        assert!(output.contains("> CREATE VIEW v AS SELECT 1 AS x\n"));
        assert!(output.contains("| x |"));
        Ok(())
    }

    #[tokio::test]
    async fn test_lazy_session_reports_execution_errors() -> Result<()> {
        let (summary, output) = run_script(
            "CREATE TABLE t AS SELECT 1 AS x;\nSELECT CAST('abc' AS INT) AS bad FROM t;\nSELECT x FROM t;",
            false,
        )
        .await?;

        assert_eq!(summary.executed, 3);
        assert_eq!(summary.failed, 1);
        assert!(output.contains("[ERROR]"));
        assert!(output.contains("| 1 |"));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_warns() -> Result<()> {
        let engine = SessionBuilder::new().target_partitions(1).build()?;
        let mut out = Vec::new();
        let summary = run_sql_file(
            engine.as_ref(),
            Path::new("/nonexistent/queries.sql"),
            &RunOptions::default(),
            &mut out,
        )
        .await?;

        assert_eq!(summary, RunSummary::default());
        assert_eq!(
            String::from_utf8(out)?,
            "[WARN] SQL file not found: /nonexistent/queries.sql\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_comment_only_file() -> Result<()> {
        let (summary, output) = run_script("-- nothing to do\n;\n  ;", true).await?;
        assert_eq!(summary, RunSummary::default());
        assert!(output.starts_with("[INFO] No executable statements found in '"));
        assert!(!output.contains("=== Running"));
        Ok(())
    }
}
