//! The dataset summary report.
//!
//! Sections mirror the dashboard's original text report: overall totals,
//! regional and thematic breakdowns of the loaded sheets, and the ten
//! columns with the widest coverage. Record-level numbers honor the
//! filter flags; the breakdown sections honor the region/theme flags at
//! sheet granularity (region and theme are per-sheet tags, a state filter
//! cannot apply to them).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use dla_cli::cli::OutputFormat;
use dla_core::aggregate::{self, ColumnCoverage};
use dla_core::catalog::{rollup_by_region, rollup_by_theme, DimensionRollup};
use dla_core::{SheetMeta, Table, View, DERIVED_COLUMNS};
use dla_io::load_shared;

use crate::commands::util::{filtered_view, gather_sources};

const TOP_COLUMN_COUNT: usize = 10;

#[derive(Serialize)]
struct SummaryReport {
    total_files: usize,
    total_sheets: usize,
    total_records: usize,
    total_columns: usize,
    regions: Vec<DimensionRollup>,
    themes: Vec<DimensionRollup>,
    top_columns: Vec<ColumnCoverage>,
}

pub fn handle(
    paths: &[PathBuf],
    data_dir: Option<&Path>,
    state: Option<&str>,
    region: Option<&str>,
    theme: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let sources = gather_sources(paths, data_dir)?;
    let result = load_shared(&sources);

    if state.is_some() || region.is_some() || theme.is_some() {
        info!(?state, ?region, ?theme, "reporting on filtered dataset");
    }

    let sheets: Vec<SheetMeta> = result
        .sheets
        .iter()
        .filter(|meta| region.map_or(true, |r| meta.region == r))
        .filter(|meta| theme.map_or(true, |t| meta.theme == t))
        .cloned()
        .collect();
    let view = filtered_view(&result.table, state, region, theme);
    let unfiltered = state.is_none() && region.is_none() && theme.is_none();

    let report = build_report(&result.table, &sheets, &view, unfiltered);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => print_plain(&report),
    }
    Ok(())
}

fn build_report(
    table: &Table,
    sheets: &[SheetMeta],
    view: &View<'_>,
    unfiltered: bool,
) -> SummaryReport {
    let distinct_files: BTreeSet<&str> = sheets.iter().map(|meta| meta.filename.as_str()).collect();
    let mut top_columns = if unfiltered {
        aggregate::column_coverage(table)
    } else {
        view_coverage(table, view)
    };
    top_columns.truncate(TOP_COLUMN_COUNT);

    SummaryReport {
        total_files: distinct_files.len(),
        total_sheets: sheets.len(),
        total_records: view.len(),
        total_columns: table.columns().len() + DERIVED_COLUMNS.len(),
        regions: rollup_by_region(sheets),
        themes: rollup_by_theme(sheets),
        top_columns,
    }
}

/// Coverage over a filtered view, sorted like
/// [`aggregate::column_coverage`].
fn view_coverage(table: &Table, view: &View<'_>) -> Vec<ColumnCoverage> {
    let total = view.len();
    let mut stats: Vec<ColumnCoverage> = table
        .columns()
        .iter()
        .map(|column| {
            let present = aggregate::count_present(view.records(), column);
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

fn print_plain(report: &SummaryReport) {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("DISASTER LAW DATASET SUMMARY REPORT");
    println!("{rule}");
    println!();
    println!("OVERALL STATISTICS:");
    println!("  Total Files Processed: {}", report.total_files);
    println!("  Total Sheets: {}", report.total_sheets);
    println!("  Total Records: {}", report.total_records);
    println!("  Total Columns: {}", report.total_columns);
    println!();
    println!("REGIONAL BREAKDOWN:");
    for rollup in &report.regions {
        println!(
            "  {}: {} datasets, {} records",
            rollup.label, rollup.sheet_count, rollup.record_count
        );
    }
    println!();
    println!("THEMATIC BREAKDOWN:");
    for rollup in &report.themes {
        println!(
            "  {}: {} datasets, {} records",
            rollup.label, rollup.sheet_count, rollup.record_count
        );
    }
    println!();
    println!("COMMON COLUMNS:");
    for coverage in &report.top_columns {
        println!(
            "  {}: {} records ({:.1}% coverage)",
            coverage.column,
            coverage.present,
            coverage.fraction * 100.0
        );
    }
    println!("{rule}");
}
