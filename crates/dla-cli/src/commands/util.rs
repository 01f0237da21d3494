//! Source discovery and filter plumbing shared by every command.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::warn;
use walkdir::WalkDir;

use dla_core::{columns, Table, View, COL_REGION, COL_THEME};
use dla_io::{SourceDescriptor, SourceFormat};

/// Directory scanned when no paths and no `--data-dir` are given.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Resolve explicit paths plus an optional scan directory into the final
/// source list. Explicit paths keep their given order; discovered files
/// follow, sorted by path so repeated runs load identically.
pub fn gather_sources(paths: &[PathBuf], data_dir: Option<&Path>) -> Result<Vec<SourceDescriptor>> {
    let mut sources: Vec<SourceDescriptor> = paths.iter().map(SourceDescriptor::new).collect();

    if let Some(dir) = data_dir {
        if !dir.is_dir() {
            bail!("data directory '{}' does not exist", dir.display());
        }
        sources.extend(discover(dir)?);
    } else if sources.is_empty() {
        let default_dir = Path::new(DEFAULT_DATA_DIR);
        if default_dir.is_dir() {
            sources.extend(discover(default_dir)?);
        }
    }

    if sources.is_empty() {
        warn!("no data files found");
    }
    Ok(sources)
}

fn discover(dir: &Path) -> Result<Vec<SourceDescriptor>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if entry.file_type().is_file() && SourceFormat::detect(entry.path()).is_some() {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found.into_iter().map(SourceDescriptor::new).collect())
}

/// Narrow a table by the optional filter flags.
pub fn filtered_view<'a>(
    table: &'a Table,
    state: Option<&str>,
    region: Option<&str>,
    theme: Option<&str>,
) -> View<'a> {
    let mut view = table.view();
    if let Some(state) = state {
        view = view.filter_eq(columns::STATE, state);
    }
    if let Some(region) = region {
        view = view.filter_eq(COL_REGION, region);
    }
    if let Some(theme) = theme {
        view = view.filter_eq(COL_THEME, theme);
    }
    view
}

/// Apply the filter flags and materialize the survivors as their own
/// table, recomputing the column union over them. Without filters the
/// table passes through untouched.
pub fn filtered_table(
    table: Table,
    state: Option<&str>,
    region: Option<&str>,
    theme: Option<&str>,
) -> Table {
    if state.is_none() && region.is_none() && theme.is_none() {
        return table;
    }
    let records = filtered_view(&table, state, region, theme)
        .records()
        .cloned()
        .collect();
    Table::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dla_core::{Record, Value};

    fn record(state: &str, region: &str) -> Record {
        let mut record = Record::new("f.csv", "f", region, "General");
        record.insert(columns::STATE, Value::text(state));
        record
    }

    #[test]
    fn test_gather_explicit_paths_keep_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("b.csv");
        let b = dir.path().join("a.csv");
        std::fs::write(&a, "x\n1\n").unwrap();
        std::fs::write(&b, "x\n2\n").unwrap();

        let sources = gather_sources(&[a.clone(), b.clone()], None).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].path, a);
        assert_eq!(sources[1].path, b);
    }

    #[test]
    fn test_gather_discovers_supported_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.csv"), "x\n").unwrap();
        std::fs::write(dir.path().join("a.xlsx"), "stub").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "skip me").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.tsv"), "x\n").unwrap();

        let sources = gather_sources(&[], Some(dir.path())).unwrap();
        let names: Vec<_> = sources
            .iter()
            .map(|s| s.path.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.xlsx", "b.csv", "c.tsv"]);
    }

    #[test]
    fn test_gather_missing_data_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(gather_sources(&[], Some(&missing)).is_err());
    }

    #[test]
    fn test_filtered_table_recomputes_union() {
        let table = Table::from_records(vec![
            record("Texas", "Southern/Mid-Atlantic"),
            record("Ohio", "Midwest"),
        ]);

        let filtered = filtered_table(table, None, Some("Midwest"), None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].region, "Midwest");
    }
}
