//! Per-sheet metadata listing with load diagnostics.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tabwriter::TabWriter;

use dla_cli::cli::OutputFormat;
use dla_core::{LoadDiagnostics, SheetMeta};
use dla_io::load_shared;

use crate::commands::util::gather_sources;

#[derive(Serialize)]
struct InspectReport<'a> {
    sheets: Vec<&'a SheetMeta>,
    diagnostics: &'a LoadDiagnostics,
}

pub fn handle(
    paths: &[PathBuf],
    data_dir: Option<&Path>,
    region: Option<&str>,
    theme: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let sources = gather_sources(paths, data_dir)?;
    let result = load_shared(&sources);

    let sheets: Vec<&SheetMeta> = result
        .sheets
        .iter()
        .filter(|meta| region.map_or(true, |r| meta.region == r))
        .filter(|meta| theme.map_or(true, |t| meta.theme == t))
        .collect();

    match format {
        OutputFormat::Json => {
            let report = InspectReport {
                sheets,
                diagnostics: &result.diagnostics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Plain => {
            let mut writer = TabWriter::new(io::stdout());
            writeln!(writer, "FILE\tSHEET\tROWS\tCOLUMNS\tREGION\tTHEME")?;
            for meta in &sheets {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    meta.filename,
                    meta.sheet_name,
                    meta.row_count,
                    meta.column_count,
                    meta.region,
                    meta.theme
                )?;
            }
            writer.flush()?;
            println!();
            print!("{}", result.diagnostics);
        }
    }
    Ok(())
}
