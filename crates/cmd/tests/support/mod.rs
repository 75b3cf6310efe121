// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Recording SqlEngine double shared by the integration tests

#![allow(dead_code)]

use arrow::array::Int64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use datafusion::error::DataFusionError;
use engine::{CsvOptions, Error, QueryResult, Result, SqlEngine, ViewInfo};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Register(String, PathBuf),
    ListViews,
    Sql(String),
    Stop,
}

/// Records every call and answers SQL with a one-column `value` result
///
/// Statements containing `FAIL` return a planning error. Statements starting
/// with `CREATE` return no columns.
#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<Call>>,
    views: Mutex<BTreeMap<String, ViewInfo>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a view straight into the catalogue, bypassing the loader
    pub fn with_view(self, view: ViewInfo) -> Self {
        self.views
            .lock()
            .expect("views lock")
            .insert(view.name.clone(), view);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn sql_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Sql(statement) => Some(statement),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

fn value_result(value: i64) -> QueryResult {
    let schema = Arc::new(Schema::new(vec![Field::new("value", DataType::Int64, false)]));
    let batch = RecordBatch::try_new(schema.clone(), vec![Arc::new(Int64Array::from(vec![value]))])
        .expect("valid batch");
    QueryResult::from_batches(schema, vec![batch])
}

#[async_trait]
impl SqlEngine for RecordingEngine {
    fn app_name(&self) -> &str {
        "recording"
    }

    async fn register_csv(
        &self,
        name: &str,
        path: &Path,
        _options: &CsvOptions,
    ) -> Result<String> {
        self.record(Call::Register(name.to_string(), path.to_path_buf()));
        let stored = name.to_lowercase();
        self.views
            .lock()
            .expect("views lock")
            .insert(stored.clone(), ViewInfo::temporary(stored.clone()));
        Ok(stored)
    }

    async fn list_views(&self) -> Result<Vec<ViewInfo>> {
        self.record(Call::ListViews);
        Ok(self
            .views
            .lock()
            .expect("views lock")
            .values()
            .cloned()
            .collect())
    }

    async fn sql(&self, statement: &str) -> Result<QueryResult> {
        self.record(Call::Sql(statement.to_string()));
        if statement.contains("FAIL") {
            return Err(Error::DataFusion(DataFusionError::Plan(format!(
                "cannot plan '{}'",
                statement
            ))));
        }
        if statement.starts_with("CREATE") {
            return Ok(QueryResult::empty());
        }
        let calls = self.calls.lock().expect("calls lock").len();
        Ok(value_result(calls as i64))
    }

    async fn stop(&self) -> Result<()> {
        self.record(Call::Stop);
        Ok(())
    }
}
