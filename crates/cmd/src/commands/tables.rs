// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use engine::{SqlEngine, ViewInfo};
use std::io::Write;

/// Print the catalogue of registered views
pub async fn show_tables(engine: &dyn SqlEngine, out: &mut dyn Write) -> Result<Vec<ViewInfo>> {
    let views = engine.list_views().await?;

    writeln!(out, "\n=== Available tables ===")?;
    if views.is_empty() {
        writeln!(out, "  (no tables registered)")?;
    }
    for view in &views {
        writeln!(
            out,
            "  • {}  (namespace: {}, kind: {})",
            view.name,
            view.namespace_label(),
            view.kind
        )?;
    }
    writeln!(out, "========================\n")?;

    Ok(views)
}
