use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load sources and print per-sheet metadata plus load diagnostics
    Inspect {
        /// Source files to load (CSV/TSV or workbook)
        paths: Vec<PathBuf>,
        /// Directory to scan recursively for supported data files; when
        /// neither paths nor this flag are given, ./data is scanned
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
        /// Only list sheets tagged with this region
        #[arg(long)]
        region: Option<String>,
        /// Only list sheets tagged with this theme
        #[arg(long)]
        theme: Option<String>,
        /// Output format for the listing
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Print the dataset summary report
    Report {
        /// Source files to load (CSV/TSV or workbook)
        paths: Vec<PathBuf>,
        /// Directory to scan recursively for supported data files; when
        /// neither paths nor this flag are given, ./data is scanned
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
        /// Restrict record statistics to rows with this State value
        #[arg(long)]
        state: Option<String>,
        /// Restrict the report to this region
        #[arg(long)]
        region: Option<String>,
        /// Restrict the report to this theme
        #[arg(long)]
        theme: Option<String>,
        /// Output format for the report
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Write CSV exports of the loaded dataset
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export every record with the derived columns first
    Combined {
        /// Source files to load (CSV/TSV or workbook)
        paths: Vec<PathBuf>,
        /// Directory to scan recursively for supported data files
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
        /// Only export rows with this State value
        #[arg(long)]
        state: Option<String>,
        /// Only export rows tagged with this region
        #[arg(long)]
        region: Option<String>,
        /// Only export rows tagged with this theme
        #[arg(long)]
        theme: Option<String>,
        /// Output CSV path
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Export the per-state rollup
    Summary {
        /// Source files to load (CSV/TSV or workbook)
        paths: Vec<PathBuf>,
        /// Directory to scan recursively for supported data files
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
        /// Only summarize rows with this State value
        #[arg(long)]
        state: Option<String>,
        /// Only summarize rows tagged with this region
        #[arg(long)]
        region: Option<String>,
        /// Only summarize rows tagged with this theme
        #[arg(long)]
        theme: Option<String>,
        /// Output CSV path
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Export row counts grouped by one or more columns
    Groups {
        /// Source files to load (CSV/TSV or workbook)
        paths: Vec<PathBuf>,
        /// Directory to scan recursively for supported data files
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
        /// Only count rows with this State value
        #[arg(long)]
        state: Option<String>,
        /// Only count rows tagged with this region
        #[arg(long)]
        region: Option<String>,
        /// Only count rows tagged with this theme
        #[arg(long)]
        theme: Option<String>,
        /// Column to group by (repeat for multiple dimensions)
        #[arg(long = "by", value_name = "COLUMN", required = true)]
        by: Vec<String>,
        /// Output CSV path
        #[arg(short, long)]
        out: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}
