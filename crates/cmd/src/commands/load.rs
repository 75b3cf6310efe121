// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use engine::{CsvOptions, SqlEngine};
use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};
use wax::{Glob, WalkBehavior};

use crate::identifier::is_safe_identifier;
use crate::report;

/// One CSV file registered as a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub path: PathBuf,
}

/// CSV files directly under `data_dir`, sorted by path
///
/// Hidden files are skipped. A missing directory yields no files.
pub fn discover_csv_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    if !data_dir.is_dir() {
        debug!("Data directory {} does not exist", data_dir.display());
        return Ok(Vec::new());
    }

    let glob = Glob::new("*.csv")?;
    let mut files = Vec::new();
    // Depth 1 lists the directory's own entries and never descends
    let flat = WalkBehavior {
        depth: 1,
        ..WalkBehavior::default()
    };
    for entry in glob.walk_with_behavior(data_dir, flat) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let hidden = path
            .file_name()
            .map(|name| name.to_string_lossy().starts_with('.'))
            .unwrap_or(true);
        if hidden {
            continue;
        }
        files.push(path.to_path_buf());
    }
    files.sort();
    Ok(files)
}

/// Table name for a CSV file: its base name without the extension
pub fn candidate_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Register every `*.csv` under `data_dir` as a table named after the file
///
/// Files whose derived name is not a safe identifier are reported and
/// skipped. Registration replaces any table of the same name. Reported and
/// returned names are the catalogue's, so `Orders.csv` becomes `orders`.
pub async fn load_csv_files(
    engine: &dyn SqlEngine,
    data_dir: &Path,
    options: &CsvOptions,
    out: &mut dyn Write,
) -> Result<Vec<Registration>> {
    let files = discover_csv_files(data_dir)?;
    if files.is_empty() {
        report::info(
            out,
            format!("No CSV files found in '{}/'.", data_dir.display()),
        )?;
        return Ok(Vec::new());
    }

    let mut registered = Vec::with_capacity(files.len());
    for path in files {
        let name = candidate_name(&path);
        if !is_safe_identifier(&name) {
            report::warn(
                out,
                format!(
                    "Skipping '{}': file name '{}' is not a valid SQL identifier \
                     (use letters, digits, underscores).",
                    path.display(),
                    name
                ),
            )?;
            continue;
        }

        let name = engine
            .register_csv(&name, &path, options)
            .await
            .with_context(|| format!("Failed to register CSV {}", path.display()))?;
        report::info(
            out,
            format!("Registered '{}' as SQL table '{}'", path.display(), name),
        )?;
        registered.push(Registration { name, path });
    }

    Ok(registered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_is_flat_and_sorted() -> Result<()> {
        let tmp = TempDir::new()?;
        fs::write(tmp.path().join("orders.csv"), "id\n1\n")?;
        fs::write(tmp.path().join("items.csv"), "id\n1\n")?;
        fs::write(tmp.path().join("notes.txt"), "not csv")?;
        fs::write(tmp.path().join(".hidden.csv"), "id\n1\n")?;
        fs::create_dir(tmp.path().join("nested"))?;
        fs::write(tmp.path().join("nested").join("deep.csv"), "id\n1\n")?;
        fs::create_dir(tmp.path().join("folder.csv"))?;
        fs::write(tmp.path().join("folder.csv").join("inner.csv"), "id\n1\n")?;

        let files = discover_csv_files(tmp.path())?;
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["items.csv", "orders.csv"]);
        Ok(())
    }

    #[test]
    fn test_discover_missing_directory() -> Result<()> {
        let tmp = TempDir::new()?;
        assert!(discover_csv_files(&tmp.path().join("absent"))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_candidate_name() {
        assert_eq!(candidate_name(Path::new("data/orders.csv")), "orders");
        assert_eq!(candidate_name(Path::new("data/2023-sales.csv")), "2023-sales");
        assert_eq!(candidate_name(Path::new("data/archive.v2.csv")), "archive.v2");
    }
}
