//! CSV exports of the normalized table and its rollups.
//!
//! Two writers mirror the two downstream artifacts: the combined export
//! (every record, derived columns first) and the per-state summary. Both
//! write absent cells as empty strings so the files round-trip through
//! [`crate::readers::read_delimited`].

use std::path::Path;

use tracing::info;

use dla_core::aggregate;
use dla_core::{DlaError, DlaResult, Table};

/// Header of the state summary export.
const STATE_SUMMARY_HEADER: [&str; 5] = [
    "State",
    "Local Authority Count",
    "Vuln Pop Protection Count",
    "region",
    "Total Records",
];

/// Write the whole table as one CSV: the four derived columns, then the
/// column union in first-seen order. Absent cells become empty fields.
pub fn write_combined_csv(table: &Table, path: &Path) -> DlaResult<()> {
    let columns = table.export_columns();
    let mut writer = csv::Writer::from_path(path).map_err(export_error)?;
    writer.write_record(&columns).map_err(export_error)?;

    for record in table.records() {
        let row: Vec<String> = columns
            .iter()
            .map(|column| {
                record
                    .get_text(column)
                    .map(|text| text.into_owned())
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&row).map_err(export_error)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.len(), "combined export written");
    Ok(())
}

/// Write the per-state rollup, one row per state sorted by name.
pub fn write_state_summary_csv(table: &Table, path: &Path) -> DlaResult<()> {
    let summary = aggregate::state_summary(table);
    let mut writer = csv::Writer::from_path(path).map_err(export_error)?;
    writer.write_record(STATE_SUMMARY_HEADER).map_err(export_error)?;

    for row in &summary {
        writer
            .write_record([
                &row.state,
                &row.local_authority_yes.to_string(),
                &row.protections_documented.to_string(),
                &row.region,
                &row.total_records.to_string(),
            ])
            .map_err(export_error)?;
    }
    writer.flush()?;

    info!(path = %path.display(), states = summary.len(), "state summary written");
    Ok(())
}

/// Write row counts per distinct combination of `dimensions`, one
/// dimension per column plus a trailing `records` column.
pub fn write_group_count_csv(table: &Table, dimensions: &[&str], path: &Path) -> DlaResult<()> {
    let counts = aggregate::group_count(table.records(), dimensions);
    let mut writer = csv::Writer::from_path(path).map_err(export_error)?;
    let header: Vec<&str> = dimensions.iter().copied().chain(["records"]).collect();
    writer.write_record(&header).map_err(export_error)?;

    for (key, count) in &counts {
        let row: Vec<String> = key
            .iter()
            .cloned()
            .chain([count.to_string()])
            .collect();
        writer.write_record(&row).map_err(export_error)?;
    }
    writer.flush()?;

    info!(path = %path.display(), groups = counts.len(), "grouped counts written");
    Ok(())
}

fn export_error(e: csv::Error) -> DlaError {
    DlaError::Export(e.to_string())
}
