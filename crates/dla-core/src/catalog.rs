//! Per-sheet metadata captured at load time.
//!
//! The loader emits one [`SheetMeta`] per successfully read sheet so the
//! reporting layer can summarize what was loaded without re-scanning the
//! table. Rollups aggregate those records per region or theme for the
//! summary report's breakdown sections.

use std::collections::BTreeMap;

use serde::Serialize;

/// What one sheet contributed to the normalized table.
///
/// `row_count` reflects rows kept after the blank-row drop, not raw sheet
/// size. `column_count` counts the sheet's original columns plus the four
/// derived ones, as the combined export exposes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetMeta {
    pub filename: String,
    pub sheet_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub region: String,
    pub theme: String,
}

/// Sheets and records contributed under one dimension label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionRollup {
    pub label: String,
    pub sheet_count: usize,
    pub record_count: usize,
}

fn rollup_by<'a, F>(sheets: &'a [SheetMeta], key: F) -> Vec<DimensionRollup>
where
    F: Fn(&'a SheetMeta) -> &'a str,
{
    let mut acc: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for meta in sheets {
        let slot = acc.entry(key(meta)).or_insert((0, 0));
        slot.0 += 1;
        slot.1 += meta.row_count;
    }
    acc.into_iter()
        .map(|(label, (sheet_count, record_count))| DimensionRollup {
            label: label.to_string(),
            sheet_count,
            record_count,
        })
        .collect()
}

/// Sheet and record totals per region, sorted by label.
pub fn rollup_by_region(sheets: &[SheetMeta]) -> Vec<DimensionRollup> {
    rollup_by(sheets, |meta| &meta.region)
}

/// Sheet and record totals per theme, sorted by label.
pub fn rollup_by_theme(sheets: &[SheetMeta]) -> Vec<DimensionRollup> {
    rollup_by(sheets, |meta| &meta.theme)
}
