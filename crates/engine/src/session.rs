// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Session bootstrap and the DataFusion-backed engine
//!
//! A session is one DataFusion `SessionContext` plus the bookkeeping needed to
//! answer catalogue queries. `SessionBuilder::get_or_create` shares one live
//! session per application name across the process; `stop` tears it down and
//! forgets it, so the next `get_or_create` starts fresh.

use crate::catalog::{ViewInfo, ViewKind};
use crate::csv::CsvOptions;
use crate::result::QueryResult;
use crate::{Error, Result, SqlEngine};
use async_trait::async_trait;
use datafusion::datasource::listing::ListingTable;
use datafusion::prelude::{SessionConfig, SessionContext};
use datafusion::sql::TableReference;
use diagnostics::*;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

/// Application name used when none is configured
pub const DEFAULT_APP_NAME: &str = "SQLServer";

static ACTIVE_SESSIONS: LazyLock<Mutex<HashMap<String, Arc<DataFusionEngine>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Options for creating a session
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    app_name: String,
    target_partitions: usize,
    eager_eval: bool,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            target_partitions: 0,
            eager_eval: true,
        }
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Number of partitions used for execution, 0 for one per available core
    pub fn target_partitions(mut self, target_partitions: usize) -> Self {
        self.target_partitions = target_partitions;
        self
    }

    /// Collect statement results inside `sql()` rather than on demand
    pub fn eager_eval(mut self, eager_eval: bool) -> Self {
        self.eager_eval = eager_eval;
        self
    }

    /// Create a fresh session that is not shared through the registry
    pub fn build(&self) -> Result<Arc<DataFusionEngine>> {
        if self.app_name.trim().is_empty() {
            return Err(Error::InvalidOption(
                "application name cannot be empty".to_string(),
            ));
        }

        let partitions = if self.target_partitions == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.target_partitions
        };

        let config = SessionConfig::new()
            .with_target_partitions(partitions)
            .with_information_schema(true);

        info!(
            "Starting session '{}' with {} partitions (eager_eval={})",
            self.app_name, partitions, self.eager_eval
        );

        Ok(Arc::new(DataFusionEngine {
            app_name: self.app_name.clone(),
            eager_eval: self.eager_eval,
            ctx: SessionContext::new_with_config(config),
            temporary: Mutex::new(BTreeSet::new()),
            stopped: AtomicBool::new(false),
        }))
    }

    /// Return the live session for this application name, creating it if needed
    ///
    /// Options of a later call do not reconfigure an existing session.
    pub fn get_or_create(&self) -> Result<Arc<DataFusionEngine>> {
        let mut sessions = ACTIVE_SESSIONS
            .lock()
            .map_err(|e| Error::MutexPoisoned(e.to_string()))?;

        if let Some(existing) = sessions.get(&self.app_name) {
            if !existing.is_stopped() {
                debug!("Reusing session '{}'", self.app_name);
                return Ok(existing.clone());
            }
        }

        let session = self.build()?;
        sessions.insert(self.app_name.clone(), session.clone());
        Ok(session)
    }
}

/// SQL engine backed by a DataFusion `SessionContext`
pub struct DataFusionEngine {
    app_name: String,
    eager_eval: bool,
    ctx: SessionContext,
    /// Names registered through `register_csv`, as stored in the catalog
    temporary: Mutex<BTreeSet<String>>,
    stopped: AtomicBool,
}

impl DataFusionEngine {
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn eager_eval(&self) -> bool {
        self.eager_eval
    }

    /// Direct access to the DataFusion session
    pub fn session_context(&self) -> &SessionContext {
        &self.ctx
    }

    fn ensure_running(&self) -> Result<()> {
        if self.is_stopped() {
            Err(Error::SessionStopped(self.app_name.clone()))
        } else {
            Ok(())
        }
    }

    fn temporary_names(&self) -> Result<std::sync::MutexGuard<'_, BTreeSet<String>>> {
        self.temporary
            .lock()
            .map_err(|e| Error::MutexPoisoned(e.to_string()))
    }

    fn default_schema_names(&self) -> (String, String) {
        let state = self.ctx.state();
        let catalog = &state.config().options().catalog;
        (
            catalog.default_catalog.clone(),
            catalog.default_schema.clone(),
        )
    }
}

#[async_trait]
impl SqlEngine for DataFusionEngine {
    fn app_name(&self) -> &str {
        &self.app_name
    }

    async fn register_csv(
        &self,
        name: &str,
        path: &Path,
        options: &CsvOptions,
    ) -> Result<String> {
        self.ensure_running()?;
        let read_options = options.read_options()?;

        // Unquoted names are normalized the same way the SQL planner does it
        let table_ref = TableReference::from(name);
        let stored_name = table_ref.table().to_string();

        if self.ctx.table_exist(table_ref.clone())? {
            debug!("Replacing existing table '{}'", stored_name);
            _ = self.ctx.deregister_table(table_ref.clone())?;
        }

        let location = path.to_string_lossy().into_owned();
        debug!("Registering CSV {} as '{}'", location, stored_name);
        self.ctx
            .register_csv(table_ref, &location, read_options)
            .await?;

        _ = self.temporary_names()?.insert(stored_name.clone());
        Ok(stored_name)
    }

    async fn list_views(&self) -> Result<Vec<ViewInfo>> {
        self.ensure_running()?;
        let (catalog_name, schema_name) = self.default_schema_names();

        let Some(schema) = self
            .ctx
            .catalog(&catalog_name)
            .and_then(|catalog| catalog.schema(&schema_name))
        else {
            warn!("Default schema {}.{} not found", catalog_name, schema_name);
            return Ok(Vec::new());
        };

        let mut names = schema.table_names();
        names.sort();

        let temporary = self.temporary_names()?.clone();
        let mut stale = Vec::new();
        let mut views = Vec::with_capacity(names.len());
        for name in names {
            let Some(provider) = schema.table(&name).await? else {
                continue;
            };
            let kind = ViewKind::from(provider.table_type());

            // A loaded name that SQL dropped and recreated is no longer a CSV table
            let loaded = provider.as_any().downcast_ref::<ListingTable>().is_some();
            if temporary.contains(&name) && !loaded {
                stale.push(name.clone());
            }

            if kind == ViewKind::Table && loaded && temporary.contains(&name) {
                views.push(ViewInfo::temporary(name));
            } else {
                views.push(ViewInfo {
                    name,
                    namespace: Some(schema_name.clone()),
                    kind,
                });
            }
        }

        // Loaded names that SQL dropped entirely
        stale.extend(
            temporary
                .into_iter()
                .filter(|name| !views.iter().any(|view| view.name == *name)),
        );
        if !stale.is_empty() {
            let mut loaded_names = self.temporary_names()?;
            for name in stale {
                debug!("Table '{}' is no longer a loaded CSV", name);
                _ = loaded_names.remove(&name);
            }
        }
        Ok(views)
    }

    async fn sql(&self, statement: &str) -> Result<QueryResult> {
        self.ensure_running()?;
        debug!("Executing SQL: {}", statement);

        let df = self.ctx.sql(statement).await?;
        if !self.eager_eval {
            return Ok(QueryResult::deferred(df));
        }

        let schema = df.schema().inner().clone();
        let batches = df.collect().await?;
        Ok(QueryResult::from_batches(schema, batches))
    }

    async fn stop(&self) -> Result<()> {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let (catalog_name, schema_name) = self.default_schema_names();
        if let Some(schema) = self
            .ctx
            .catalog(&catalog_name)
            .and_then(|catalog| catalog.schema(&schema_name))
        {
            for name in schema.table_names() {
                _ = schema.deregister_table(&name)?;
            }
        }
        self.temporary_names()?.clear();

        ACTIVE_SESSIONS
            .lock()
            .map_err(|e| Error::MutexPoisoned(e.to_string()))?
            .retain(|_, session| !session.is_stopped());

        info!("Stopped session '{}'", self.app_name);
        Ok(())
    }
}
