//! Pure aggregation functions over normalized records.
//!
//! Everything here is a stateless transform: functions take any iterator
//! of records (a whole [`Table`] or a filtered [`View`](crate::View) behave
//! identically) and return plain numeric or categorical results. Missing
//! columns and empty inputs degrade to zero/default values instead of
//! raising, because the heterogeneous source files guarantee no common
//! schema.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{columns, Record, Table};

/// The boolean-true literal these datasets use for flag columns.
///
/// Comparison is trimmed and case-insensitive, so `"Yes"` and `" YES "`
/// count; anything else (including absence) does not. Other affirmative
/// spellings are not recognized.
pub const FLAG_YES: &str = "yes";

fn flag_matches(record: &Record, column: &str, flag_lower: &str) -> bool {
    record
        .get_text(column)
        .map(|v| v.trim().to_lowercase() == flag_lower)
        .unwrap_or(false)
}

/// Count rows whose `column` value equals `flag`, trimmed and
/// case-insensitive. Rows with a missing value never count; an unknown
/// column yields zero.
pub fn count_flag<'a, I>(rows: I, column: &str, flag: &str) -> usize
where
    I: IntoIterator<Item = &'a Record>,
{
    let flag_lower = flag.trim().to_lowercase();
    rows.into_iter()
        .filter(|r| flag_matches(r, column, &flag_lower))
        .count()
}

/// Count rows with a non-missing value in `column`, regardless of content.
/// An unknown column yields zero.
pub fn count_present<'a, I>(rows: I, column: &str) -> usize
where
    I: IntoIterator<Item = &'a Record>,
{
    rows.into_iter().filter(|r| r.has(column)).count()
}

/// Row count per distinct combination of the given dimension values.
///
/// Returned as a `BTreeMap` so iteration order is by dimension value,
/// reproducible across runs. Rows missing any of the dimensions are
/// skipped, so an unknown dimension column yields an empty map.
pub fn group_count<'a, I>(rows: I, dimensions: &[&str]) -> BTreeMap<Vec<String>, usize>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut counts: BTreeMap<Vec<String>, usize> = BTreeMap::new();
    'rows: for record in rows {
        let mut key = Vec::with_capacity(dimensions.len());
        for dimension in dimensions {
            match record.get_text(dimension) {
                Some(value) => key.push(value.into_owned()),
                None => continue 'rows,
            }
        }
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Fraction of rows with a non-missing value in `column`.
///
/// An empty input yields `0.0`, never a division fault.
pub fn coverage<'a, I>(rows: I, column: &str) -> f64
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut total = 0usize;
    let mut present = 0usize;
    for record in rows {
        total += 1;
        if record.has(column) {
            present += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        present as f64 / total as f64
    }
}

/// Non-missing statistics for one original column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnCoverage {
    pub column: String,
    /// Rows with a value in this column
    pub present: usize,
    /// `present` over the table's row count, 0.0 on an empty table
    pub fraction: f64,
}

/// Presence statistics for every original column, sorted by descending
/// count and then by name. Feeds the report's most-common-columns section.
pub fn column_coverage(table: &Table) -> Vec<ColumnCoverage> {
    let total = table.len();
    let mut stats: Vec<ColumnCoverage> = table
        .columns()
        .iter()
        .map(|column| {
            let present = count_present(table.records(), column);
            ColumnCoverage {
                column: column.clone(),
                present,
                fraction: if total == 0 {
                    0.0
                } else {
                    present as f64 / total as f64
                },
            }
        })
        .collect();
    stats.sort_by(|a, b| {
        b.present
            .cmp(&a.present)
            .then_with(|| a.column.cmp(&b.column))
    });
    stats
}

/// One row of the per-state rollup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummaryRow {
    pub state: String,
    /// Rows flagging `Local Authority` as yes
    pub local_authority_yes: usize,
    /// Rows with documented vulnerable-population protections
    pub protections_documented: usize,
    /// Region of the state's first record
    pub region: String,
    pub total_records: usize,
}

/// Roll the table up by `State`: local-authority yes-count, documented
/// protection count, first-seen region, and record total per state.
///
/// Rows without a `State` value are excluded. Sorted by state name.
pub fn state_summary(table: &Table) -> Vec<StateSummaryRow> {
    let mut by_state: BTreeMap<String, StateSummaryRow> = BTreeMap::new();
    for record in table.records() {
        let Some(state) = record.get_text(columns::STATE) else {
            continue;
        };
        let entry = by_state
            .entry(state.into_owned())
            .or_insert_with_key(|state| StateSummaryRow {
                state: state.clone(),
                local_authority_yes: 0,
                protections_documented: 0,
                region: record.region.clone(),
                total_records: 0,
            });
        entry.total_records += 1;
        if flag_matches(record, columns::LOCAL_AUTHORITY, FLAG_YES) {
            entry.local_authority_yes += 1;
        }
        if record.has(columns::VULNERABLE_PROTECTIONS) {
            entry.protections_documented += 1;
        }
    }
    by_state.into_values().collect()
}
