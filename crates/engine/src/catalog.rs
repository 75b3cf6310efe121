// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use datafusion::logical_expr::TableType;
use std::fmt;

/// Label printed when a view has no namespace
pub const DEFAULT_NAMESPACE: &str = "default";

/// How a registered view is backed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Session-scoped registration made by the loader
    Temporary,
    /// Created by a `CREATE VIEW` statement
    View,
    /// Any other table in the session catalog
    Table,
}

impl From<TableType> for ViewKind {
    fn from(table_type: TableType) -> Self {
        match table_type {
            TableType::Temporary => ViewKind::Temporary,
            TableType::View => ViewKind::View,
            TableType::Base => ViewKind::Table,
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViewKind::Temporary => "TEMPORARY",
            ViewKind::View => "VIEW",
            ViewKind::Table => "TABLE",
        };
        f.write_str(label)
    }
}

/// One entry of the session catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewInfo {
    pub name: String,
    pub namespace: Option<String>,
    pub kind: ViewKind,
}

impl ViewInfo {
    pub fn temporary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            kind: ViewKind::Temporary,
        }
    }

    /// Namespace for display, `default` when unset
    pub fn namespace_label(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }
}
