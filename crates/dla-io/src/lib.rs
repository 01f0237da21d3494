//! # dla-io: Dataset Loading & Export
//!
//! Reads heterogeneous spreadsheet sources (Excel workbooks and flat
//! delimited files) into one normalized, tagged table, and writes the
//! combined table and its summaries back out as CSV.
//!
//! ## Design Philosophy
//!
//! **Single Responsibility**: Each format reader only turns bytes into a
//! raw sheet grid. Tagging, blank-row dropping, and concatenation happen
//! once in the loader, identically for every format.
//!
//! **Error Recovery**: Partial loads are the expected case. A missing
//! path skips that source, an unreadable sheet skips that sheet, and
//! everything skipped is recorded in diagnostics for user visibility
//! rather than panicking or aborting the load.
//!
//! **Immutable Result**: The loaded table is never mutated afterwards.
//! [`loader::load_shared`] memoizes one shared `Arc` per distinct source
//! list so every consumer reads the same snapshot.
//!
//! ## Quick Start: Load a Directory of Workbooks
//!
//! ```rust,no_run
//! use dla_io::loader::{load, SourceDescriptor};
//!
//! let sources = vec![
//!     SourceDescriptor::new("data/AKHIKeyStatutesCodes.xlsx"),
//!     SourceDescriptor::new("data/MidwestEmergencyDeclarations.xlsx"),
//! ];
//! let result = load(&sources);
//!
//! println!("Records: {}", result.table.len());
//! println!("Sheets:  {}", result.sheets.len());
//! print!("{}", result.diagnostics);
//! ```
//!
//! ## Supported Formats
//!
//! | Format | File Extensions | Notes |
//! |--------|-----------------|-------|
//! | Delimited text | `.csv`, `.tsv` | One sheet per file, named after the file stem |
//! | Excel workbook | `.xlsx`, `.xlsm`, `.xlsb`, `.xls` | Every named sheet is read |
//!
//! Format is inferred from the file extension; there is no content
//! sniffing. Unrecognized extensions are skipped with a warning.
//!
//! ## Module Overview
//!
//! - [`readers`] - per-format readers and [`readers::SourceFormat`] detection
//! - [`loader`] - the multi-source loader and the shared-dataset cache
//! - [`export`] - combined, state-summary, and grouped-count CSV writers

pub mod export;
pub mod loader;
pub mod readers;

pub use loader::{load, load_shared, LoadResult, SourceDescriptor};
pub use readers::SourceFormat;
