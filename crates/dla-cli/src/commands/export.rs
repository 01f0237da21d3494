//! CSV export commands.

use std::path::{Path, PathBuf};

use anyhow::Result;

use dla_cli::cli::ExportCommands;
use dla_core::Table;
use dla_io::export::{write_combined_csv, write_group_count_csv, write_state_summary_csv};
use dla_io::load;

use crate::commands::util::{filtered_table, gather_sources};

pub fn handle(command: &ExportCommands) -> Result<()> {
    match command {
        ExportCommands::Combined {
            paths,
            data_dir,
            state,
            region,
            theme,
            out,
        } => {
            let table = load_filtered(
                paths,
                data_dir.as_deref(),
                state.as_deref(),
                region.as_deref(),
                theme.as_deref(),
            )?;
            write_combined_csv(&table, out)?;
            println!("Combined data exported to {}", out.display());
            Ok(())
        }
        ExportCommands::Summary {
            paths,
            data_dir,
            state,
            region,
            theme,
            out,
        } => {
            let table = load_filtered(
                paths,
                data_dir.as_deref(),
                state.as_deref(),
                region.as_deref(),
                theme.as_deref(),
            )?;
            write_state_summary_csv(&table, out)?;
            println!("State summary saved to {}", out.display());
            Ok(())
        }
        ExportCommands::Groups {
            paths,
            data_dir,
            state,
            region,
            theme,
            by,
            out,
        } => {
            let table = load_filtered(
                paths,
                data_dir.as_deref(),
                state.as_deref(),
                region.as_deref(),
                theme.as_deref(),
            )?;
            let dimensions: Vec<&str> = by.iter().map(String::as_str).collect();
            write_group_count_csv(&table, &dimensions, out)?;
            println!("Grouped counts exported to {}", out.display());
            Ok(())
        }
    }
}

fn load_filtered(
    paths: &[PathBuf],
    data_dir: Option<&Path>,
    state: Option<&str>,
    region: Option<&str>,
    theme: Option<&str>,
) -> Result<Table> {
    let sources = gather_sources(paths, data_dir)?;
    let result = load(&sources);
    Ok(filtered_table(result.table, state, region, theme))
}
