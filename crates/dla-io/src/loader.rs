//! Multi-source loading into the normalized table.
//!
//! [`load`] is the single entry point: it walks a list of source
//! descriptors, reads every sheet each one yields, tags rows with the
//! derived columns, and concatenates everything into one [`Table`].
//! Problems with individual sources or sheets become diagnostics, never
//! errors; the function always returns whatever could be read.
//! [`load_shared`] wraps it in a process-wide cache keyed by the source
//! list.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::{debug, info, warn};

use dla_core::classify::{region_rules, theme_rules};
use dla_core::{DlaResult, LoadDiagnostics, Record, SheetMeta, Table, DERIVED_COLUMNS};

use crate::readers::{read_delimited, read_workbook, RawSheet, SourceFormat};

/// One file to load, with an optional format override.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceDescriptor {
    pub path: PathBuf,
    /// When `None`, the format is detected from the file extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<SourceFormat>,
}

impl SourceDescriptor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
        }
    }

    /// Force a format instead of detecting one from the extension.
    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Everything one load run produced: the concatenated table, one
/// metadata entry per successfully read sheet, and the diagnostic report
/// describing what was skipped or dropped along the way.
#[derive(Debug, Clone, Serialize)]
pub struct LoadResult {
    pub table: Table,
    pub sheets: Vec<SheetMeta>,
    pub diagnostics: LoadDiagnostics,
}

/// Read every source and build the normalized table.
///
/// Total by design: a missing file, an unrecognized extension, an
/// unreadable workbook, or a broken sheet each produce a diagnostic and
/// the load moves on. The returned table holds exactly the non-blank
/// rows of every sheet that was read, in source order, and
/// `result.sheets` holds one entry per sheet with its post-drop row
/// count.
pub fn load(sources: &[SourceDescriptor]) -> LoadResult {
    let mut table = Table::new();
    let mut sheets = Vec::new();
    let mut diag = LoadDiagnostics::new();

    for source in sources {
        let path = source.path.as_path();
        let label = source_label(path);

        if !path.exists() {
            warn!(source = %label, "source file does not exist, skipping");
            diag.add_missing_source(&label);
            continue;
        }

        let format = match source.format.or_else(|| SourceFormat::detect(path)) {
            Some(format) => format,
            None => {
                warn!(source = %label, "unrecognized extension, skipping");
                diag.add_skipped_source("unrecognized extension", &label);
                continue;
            }
        };

        let raw_sheets = match read_source(path, format, &mut diag) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(source = %label, error = %e, "failed to read source");
                diag.add_error_for_source("source", &e.to_string(), &label);
                continue;
            }
        };

        diag.stats.sources_read += 1;

        // Region and theme come from the file name, so they are fixed
        // for every sheet and row of this source.
        let region = region_rules().classify(Some(&label)).to_string();
        let theme = theme_rules().classify(Some(&label)).to_string();

        for raw in raw_sheets {
            let sheet_name = raw.name.clone();
            let column_count = raw.columns.len() + DERIVED_COLUMNS.len();
            let (records, dropped) = normalize_sheet(&label, raw, &region, &theme);
            let kept = records.len();

            debug!(
                source = %label,
                sheet = %sheet_name,
                rows = kept,
                dropped,
                "sheet loaded"
            );

            sheets.push(SheetMeta {
                filename: label.clone(),
                sheet_name,
                row_count: kept,
                column_count,
                region: region.clone(),
                theme: theme.clone(),
            });

            diag.stats.sheets_read += 1;
            diag.stats.rows_kept += kept;
            diag.stats.rows_dropped += dropped;

            table.append(records);
        }
    }

    info!(
        sources = diag.stats.sources_read,
        sheets = diag.stats.sheets_read,
        rows = table.len(),
        "load complete"
    );

    LoadResult {
        table,
        sheets,
        diagnostics: diag,
    }
}

static DATASET_CACHE: Lazy<Mutex<HashMap<Vec<SourceDescriptor>, Arc<LoadResult>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// [`load`] through the process-wide cache.
///
/// The same source list (same paths, same order, same overrides) hits
/// disk once; later calls share the first result. Callers that need a
/// fresh read use [`load`] directly.
pub fn load_shared(sources: &[SourceDescriptor]) -> Arc<LoadResult> {
    let mut cache = DATASET_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(result) = cache.get(sources) {
        return Arc::clone(result);
    }
    let result = Arc::new(load(sources));
    cache.insert(sources.to_vec(), Arc::clone(&result));
    result
}

fn read_source(
    path: &Path,
    format: SourceFormat,
    diag: &mut LoadDiagnostics,
) -> DlaResult<Vec<RawSheet>> {
    match format {
        SourceFormat::Delimited => Ok(vec![read_delimited(path)?]),
        SourceFormat::Workbook => read_workbook(path, diag),
    }
}

/// Turn a raw sheet into tagged records, dropping rows that are blank
/// across every original column. Returns the surviving records and the
/// dropped-row count.
fn normalize_sheet(
    filename: &str,
    raw: RawSheet,
    region: &str,
    theme: &str,
) -> (Vec<Record>, usize) {
    let RawSheet {
        name,
        columns,
        rows,
    } = raw;

    let mut records = Vec::with_capacity(rows.len());
    let mut dropped = 0;
    for cells in rows {
        let mut record = Record::new(filename, name.as_str(), region, theme);
        for (column, cell) in columns.iter().zip(cells) {
            if let Some(value) = cell {
                record.insert(column.as_str(), value);
            }
        }
        if record.is_blank() {
            dropped += 1;
        } else {
            records.push(record);
        }
    }
    (records, dropped)
}

fn source_label(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dla_core::Value;

    fn raw(name: &str, columns: &[&str], rows: Vec<Vec<Option<Value>>>) -> RawSheet {
        RawSheet {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn test_normalize_drops_blank_rows() {
        let sheet = raw(
            "Sheet1",
            &["State", "Local Authority"],
            vec![
                vec![Some(Value::text("Texas")), Some(Value::text("Yes"))],
                vec![None, None],
                vec![None, Some(Value::text("No"))],
            ],
        );

        let (records, dropped) = normalize_sheet("southern.csv", sheet, "Southern", "General");
        assert_eq!(records.len(), 2);
        assert_eq!(dropped, 1);
        assert_eq!(records[0].source_file, "southern.csv");
        assert_eq!(records[0].sheet_name, "Sheet1");
        assert_eq!(records[0].region, "Southern");
        assert_eq!(records[1].field("State"), None);
    }

    #[test]
    fn test_normalize_empty_sheet() {
        let sheet = raw("Empty", &[], vec![]);
        let (records, dropped) = normalize_sheet("x.csv", sheet, "Other", "General");
        assert!(records.is_empty());
        assert_eq!(dropped, 0);
    }

    #[test]
    fn test_descriptor_format_override() {
        let source = SourceDescriptor::new("data.bin").with_format(SourceFormat::Delimited);
        assert_eq!(source.format, Some(SourceFormat::Delimited));
        assert_eq!(SourceDescriptor::new("data.bin").format, None);
    }

    #[test]
    fn test_source_label_prefers_file_name() {
        assert_eq!(source_label(Path::new("/tmp/data/AKHI.xlsx")), "AKHI.xlsx");
    }
}
