//! Core data model for state disaster-law dataset analysis.
//!
//! This crate provides the in-memory representation of heterogeneous
//! spreadsheet data after ingestion: tagged records, the normalized
//! column-union table, classification rule tables, and the pure
//! aggregation functions the reporting layer consumes.
//!
//! # Design Philosophy
//!
//! The source corpus is a pile of workbooks and flat files with
//! inconsistent column sets and no shared schema. Rather than forcing a
//! schema, the model keeps each row as a map of the columns its sheet
//! actually had. A column a sheet never defined is simply absent from its
//! rows, never defaulted. The four derived attributes every row is
//! guaranteed to carry (source file, sheet, region, theme) are plain
//! struct fields, so the "never null" invariant holds by construction.
//!
//! The table is immutable once loaded. Filtering produces borrowed
//! [`View`]s and every aggregation function accepts any iterator of
//! records, so a view and the full table aggregate identically. All
//! aggregation is total: missing columns and empty inputs produce zero
//! or fallback results, never errors.
//!
//! # Quick Start
//!
//! ```rust
//! use dla_core::{aggregate, Record, Table, Value};
//!
//! let mut record = Record::new(
//!     "AKHIKeyStatutesCodes.xlsx",
//!     "Alaska",
//!     "Alaska/Hawaii",
//!     "Legal Framework",
//! );
//! record.insert("State", Value::text("Alaska"));
//! record.insert("Local Authority", Value::text("yes"));
//!
//! let table = Table::from_records(vec![record]);
//! assert_eq!(table.len(), 1);
//! assert_eq!(aggregate::count_flag(table.records(), "Local Authority", "yes"), 1);
//!
//! let view = table.filter_eq("State", "Alaska");
//! assert_eq!(view.len(), 1);
//! ```
//!
//! # Core Data Structures
//!
//! - [`Value`]: a single cell (text, number, or bool). Absence is the
//!   field not being present in the record's map.
//! - [`Record`]: one row from one sheet, with derived tags and the
//!   sheet's original columns in sheet order.
//! - [`Table`]: all surviving records plus the cached column union in
//!   first-seen order.
//! - [`View`]: a borrowed, filtered subset of a table's records.
//! - [`SheetMeta`]: what each sheet contributed, for reporting without
//!   re-scanning the table.
//!
//! # Derived Columns
//!
//! Every record exposes four derived columns under fixed names
//! ([`COL_SOURCE_FILE`], [`COL_SHEET_NAME`], [`COL_REGION`],
//! [`COL_THEME`]). [`Record::get_text`] resolves those names to the
//! record's tags and everything else to the original field map, so
//! aggregation and export treat derived and original columns uniformly.
//!
//! # Modules
//!
//! - [`aggregate`]: pure counting/grouping/coverage functions
//! - [`catalog`]: per-sheet metadata and its rollups
//! - [`classify`]: ordered substring-rule tables for filenames and free text
//! - [`diagnostics`]: warning/error collection for loads
//! - [`error`]: the unified [`DlaError`] type

use std::borrow::Cow;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

pub mod aggregate;
pub mod catalog;
pub mod classify;
pub mod diagnostics;
pub mod error;

pub use aggregate::{ColumnCoverage, StateSummaryRow};
pub use catalog::{DimensionRollup, SheetMeta};
pub use classify::{Rule, RuleTable};
pub use diagnostics::{DiagnosticIssue, Diagnostics, LoadDiagnostics, LoadStats, Severity};
pub use error::{DlaError, DlaResult};

/// Column name the originating file is exposed under.
pub const COL_SOURCE_FILE: &str = "source_file";
/// Column name the originating sheet is exposed under.
pub const COL_SHEET_NAME: &str = "sheet_name";
/// Column name the derived region tag is exposed under.
pub const COL_REGION: &str = "region";
/// Column name the derived theme tag is exposed under.
pub const COL_THEME: &str = "theme";

/// The derived columns every record carries, in export order.
pub const DERIVED_COLUMNS: [&str; 4] = [COL_SOURCE_FILE, COL_SHEET_NAME, COL_REGION, COL_THEME];

/// Column names the analysis layer knows about.
///
/// Presence is optional per source; aggregation degrades to zero/default
/// results when a column is missing from the loaded data.
pub mod columns {
    pub const STATE: &str = "State";
    pub const REGION: &str = "Region";
    pub const LOCAL_AUTHORITY: &str = "Local Authority";
    pub const VULNERABLE_PROTECTIONS: &str = "Vulnerable Populations Protections";
    pub const EQUITY_INITIATIVES: &str = "Equity Initiatives";
    pub const MUTUAL_AID: &str = "Mutual Aid";
    pub const MITIGATION_PLANNING: &str = "Mitigation Planning";
    pub const LOCAL_EMERGENCY_POWERS: &str = "Local Emergency Powers";
    pub const EMERGENCY_DECLARATION: &str = "Emergency Declaration";
}

/// A single cell value.
///
/// Absent cells have no representation here: a record that lacks a column
/// simply has no entry for it. Flat files produce only `Text`; typed
/// workbook cells also produce `Number` and `Bool`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Free text (the dominant case in these datasets)
    Text(String),
    /// Numeric cell from a typed workbook column
    Number(f64),
    /// Boolean cell
    Bool(bool),
}

impl Value {
    /// Convenience constructor for text values.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Borrowed string for text values, `None` for typed cells.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    /// The canonical string form used for grouping, flag comparison, and
    /// the combined export.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One row from one sheet of one source file.
///
/// The derived tags are struct fields rather than map entries, so every
/// record has a region and theme by construction. `fields` holds only the
/// sheet's original columns, in sheet order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Originating file name
    pub source_file: String,
    /// Originating sheet (file stem for flat files)
    pub sheet_name: String,
    /// Macro-region derived from the file name
    pub region: String,
    /// Content theme derived from the file name
    pub theme: String,
    /// Original columns, in sheet order
    pub fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new(
        source_file: impl Into<String>,
        sheet_name: impl Into<String>,
        region: impl Into<String>,
        theme: impl Into<String>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            sheet_name: sheet_name.into(),
            region: region.into(),
            theme: theme.into(),
            fields: IndexMap::new(),
        }
    }

    /// Set an original column's value.
    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.fields.insert(column.into(), value);
    }

    /// Look up an original column.
    pub fn field(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Unified lookup across derived and original columns, in the string
    /// form used for comparison, grouping, and export.
    ///
    /// The four derived column names resolve to the record's tags; any
    /// other name is looked up in the original fields. `None` means the
    /// cell is absent.
    pub fn get_text(&self, column: &str) -> Option<Cow<'_, str>> {
        match column {
            COL_SOURCE_FILE => Some(Cow::Borrowed(self.source_file.as_str())),
            COL_SHEET_NAME => Some(Cow::Borrowed(self.sheet_name.as_str())),
            COL_REGION => Some(Cow::Borrowed(self.region.as_str())),
            COL_THEME => Some(Cow::Borrowed(self.theme.as_str())),
            _ => self.fields.get(column).map(|value| match value {
                Value::Text(s) => Cow::Borrowed(s.as_str()),
                other => Cow::Owned(other.to_string()),
            }),
        }
    }

    /// Whether the record has a value for `column`. Derived column names
    /// always do.
    pub fn has(&self, column: &str) -> bool {
        DERIVED_COLUMNS.contains(&column) || self.fields.contains_key(column)
    }

    /// True when every original column is absent. Such rows carry no
    /// information and are dropped before concatenation.
    pub fn is_blank(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The Normalized Table: every surviving record from every successfully
/// read sheet, concatenated, with the column union cached in first-seen
/// order.
///
/// Immutable by convention after loading. All accessors are read-only;
/// [`Table::filter_eq`] returns a borrowed [`View`] rather than copying
/// or mutating anything.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    records: Vec<Record>,
    /// Union of original columns in first-seen order. Derived columns are
    /// not listed here; they prefix every export.
    columns: IndexSet<String>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from already-tagged records, computing the column
    /// union as they are appended.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut table = Self::new();
        table.append(records);
        table
    }

    /// Append one record, extending the column union in its field order.
    pub fn push(&mut self, record: Record) {
        for column in record.fields.keys() {
            if !self.columns.contains(column.as_str()) {
                self.columns.insert(column.clone());
            }
        }
        self.records.push(record);
    }

    /// Append a sheet's records in order.
    pub fn append(&mut self, records: Vec<Record>) {
        for record in records {
            self.push(record);
        }
    }

    /// The records, in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Union of original column names in first-seen order.
    pub fn columns(&self) -> &IndexSet<String> {
        &self.columns
    }

    /// Every column as the combined export exposes them: the four derived
    /// columns first, then the original union.
    pub fn export_columns(&self) -> Vec<&str> {
        DERIVED_COLUMNS
            .iter()
            .copied()
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }

    /// Borrowed view of every record.
    pub fn view(&self) -> View<'_> {
        View {
            rows: self.records.iter().collect(),
        }
    }

    /// Borrowed view of the rows whose `column` value equals `value`
    /// exactly (case-sensitive, matching the original filter behavior).
    /// Rows missing the column never match.
    pub fn filter_eq(&self, column: &str, value: &str) -> View<'_> {
        View {
            rows: self
                .records
                .iter()
                .filter(|r| r.get_text(column).as_deref() == Some(value))
                .collect(),
        }
    }

    /// Distinct values of a column, sorted. Feeds filter pickers in the
    /// presentation layer.
    pub fn distinct(&self, column: &str) -> Vec<String> {
        let mut values: Vec<String> = self
            .records
            .iter()
            .filter_map(|r| r.get_text(column).map(Cow::into_owned))
            .collect();
        values.sort();
        values.dedup();
        values
    }
}

/// A borrowed, read-only subset of a table's records.
///
/// Views never copy records and never touch the table they borrow from.
/// They can be narrowed further with [`View::filter_eq`].
#[derive(Debug, Clone)]
pub struct View<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> View<'a> {
    /// The records in this view, in table order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Narrow the view by another column/value equality.
    pub fn filter_eq(&self, column: &str, value: &str) -> View<'a> {
        View {
            rows: self
                .rows
                .iter()
                .copied()
                .filter(|r| r.get_text(column).as_deref() == Some(value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(source: &str, sheet: &str, region: &str, theme: &str) -> Record {
        Record::new(source, sheet, region, theme)
    }

    #[test]
    fn test_value_display_forms() {
        assert_eq!(Value::text("Alaska").to_string(), "Alaska");
        assert_eq!(Value::Number(2021.0).to_string(), "2021");
        assert_eq!(Value::Number(1.5).to_string(), "1.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_record_get_text_resolves_derived_and_original() {
        let mut record = tagged("a.xlsx", "Sheet1", "Midwest", "General");
        record.insert("State", Value::text("Ohio"));

        assert_eq!(record.get_text(COL_SOURCE_FILE).as_deref(), Some("a.xlsx"));
        assert_eq!(record.get_text(COL_REGION).as_deref(), Some("Midwest"));
        assert_eq!(record.get_text("State").as_deref(), Some("Ohio"));
        assert_eq!(record.get_text("Missing"), None);
        assert!(record.has(COL_THEME));
        assert!(record.has("State"));
        assert!(!record.has("Missing"));
    }

    #[test]
    fn test_blank_record_detection() {
        let mut record = tagged("a.xlsx", "Sheet1", "Other", "General");
        assert!(record.is_blank());
        record.insert("State", Value::text("Ohio"));
        assert!(!record.is_blank());
    }

    #[test]
    fn test_column_union_keeps_first_seen_order() {
        let mut first = tagged("a.xlsx", "Sheet1", "Other", "General");
        first.insert("State", Value::text("Ohio"));
        first.insert("Local Authority", Value::text("yes"));

        let mut second = tagged("b.xlsx", "Sheet1", "Other", "General");
        second.insert("State", Value::text("Iowa"));
        second.insert("Mutual Aid", Value::text("yes"));

        let table = Table::from_records(vec![first, second]);
        let columns: Vec<&String> = table.columns().iter().collect();
        assert_eq!(columns, ["State", "Local Authority", "Mutual Aid"]);

        let export = table.export_columns();
        assert_eq!(export[0], COL_SOURCE_FILE);
        assert_eq!(export[4], "State");
        assert_eq!(export.len(), 7);
    }

    #[test]
    fn test_absent_column_stays_absent_after_union() {
        let mut first = tagged("a.xlsx", "Sheet1", "Other", "General");
        first.insert("State", Value::text("Ohio"));
        first.insert("Mutual Aid", Value::text("yes"));

        let mut second = tagged("b.xlsx", "Sheet1", "Other", "General");
        second.insert("State", Value::text("Iowa"));

        let table = Table::from_records(vec![first, second]);
        assert!(table.columns().contains("Mutual Aid"));
        assert_eq!(table.records()[1].get_text("Mutual Aid"), None);
    }

    #[test]
    fn test_filter_eq_is_exact_and_chains() {
        let mut a = tagged("a.xlsx", "Sheet1", "Midwest", "General");
        a.insert("State", Value::text("Ohio"));
        let mut b = tagged("a.xlsx", "Sheet1", "Midwest", "General");
        b.insert("State", Value::text("ohio"));
        let mut c = tagged("b.xlsx", "Sheet1", "Northeast", "General");
        c.insert("State", Value::text("Ohio"));

        let table = Table::from_records(vec![a, b, c]);
        let view = table.filter_eq("State", "Ohio");
        assert_eq!(view.len(), 2);

        let narrowed = view.filter_eq(COL_REGION, "Midwest");
        assert_eq!(narrowed.len(), 1);

        let empty = table.filter_eq("No Such Column", "x");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_distinct_sorted_and_deduped() {
        let mut a = tagged("a.xlsx", "Sheet1", "Midwest", "General");
        a.insert("State", Value::text("Ohio"));
        let mut b = tagged("a.xlsx", "Sheet1", "Midwest", "General");
        b.insert("State", Value::text("Iowa"));
        let c = tagged("a.xlsx", "Sheet1", "Midwest", "General");
        let mut d = tagged("a.xlsx", "Sheet1", "Midwest", "General");
        d.insert("State", Value::text("Ohio"));

        let table = Table::from_records(vec![a, b, c, d]);
        assert_eq!(table.distinct("State"), ["Iowa", "Ohio"]);
        assert_eq!(table.distinct(COL_REGION).len(), 1);
    }
}
