// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Statement results and their table rendering

use crate::Result;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches_with_options;
use arrow_cast::display::FormatOptions;
use datafusion::dataframe::DataFrame;

enum Rows {
    Collected(Vec<RecordBatch>),
    Deferred(Box<DataFrame>),
}

/// Output of one SQL statement
///
/// Eager sessions hand back collected batches. Lazy sessions hand back the
/// planned DataFrame, which only executes on [`QueryResult::collect`].
pub struct QueryResult {
    schema: SchemaRef,
    rows: Rows,
}

impl QueryResult {
    pub fn from_batches(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self {
            schema,
            rows: Rows::Collected(batches),
        }
    }

    pub fn deferred(df: DataFrame) -> Self {
        Self {
            schema: df.schema().inner().clone(),
            rows: Rows::Deferred(Box::new(df)),
        }
    }

    /// Result with no output columns, as returned by DDL statements
    pub fn empty() -> Self {
        Self::from_batches(SchemaRef::new(arrow::datatypes::Schema::empty()), Vec::new())
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Output column names, empty for statements that return no rows
    pub fn columns(&self) -> Vec<String> {
        self.schema
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect()
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self.rows, Rows::Deferred(_))
    }

    /// Execute (if still deferred) and return the result batches
    pub async fn collect(self) -> Result<Vec<RecordBatch>> {
        match self.rows {
            Rows::Collected(batches) => Ok(batches),
            Rows::Deferred(df) => Ok((*df).collect().await?),
        }
    }

    /// Collect and render as an ASCII table, see [`render_batches`]
    pub async fn show(self, max_rows: usize) -> Result<String> {
        let schema = self.schema.clone();
        let batches = self.collect().await?;
        render_batches(&schema, &batches, max_rows)
    }
}

/// Render batches as an ASCII table with untruncated cells
///
/// At most `max_rows` rows are shown; when rows were left out, an
/// `only showing top N rows` line follows the table. An empty result still
/// prints its header.
pub fn render_batches(
    schema: &SchemaRef,
    batches: &[RecordBatch],
    max_rows: usize,
) -> Result<String> {
    let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();

    let mut shown = Vec::new();
    let mut remaining = max_rows;
    for batch in batches {
        if remaining == 0 {
            break;
        }
        let take = batch.num_rows().min(remaining);
        if take > 0 {
            shown.push(batch.slice(0, take));
            remaining -= take;
        }
    }
    if shown.is_empty() {
        shown.push(RecordBatch::new_empty(schema.clone()));
    }

    let options = FormatOptions::default()
        .with_display_error(true)
        .with_null("NULL");

    let mut output = pretty_format_batches_with_options(&shown, &options)?.to_string();
    if total_rows > max_rows {
        output.push_str(&format!("\nonly showing top {} rows", max_rows));
    }
    Ok(output)
}
