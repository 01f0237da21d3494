//! Per-format readers producing raw sheets for the loader.
//!
//! Readers are deliberately plain: they deliver a sheet's grid as typed
//! cells plus trimmed column names, and leave tagging, blank-row
//! dropping, and concatenation to the loader.

pub mod delimited;
pub mod workbook;

use std::path::Path;

use serde::Serialize;

use dla_core::Value;

pub use delimited::read_delimited;
pub use workbook::read_workbook;

/// One sheet's raw content as read from disk, before tagging and
/// normalization.
#[derive(Debug, Clone)]
pub struct RawSheet {
    /// Sheet name (file stem for flat files)
    pub name: String,
    /// Trimmed column names, in sheet order
    pub columns: Vec<String>,
    /// Cells per row, positionally aligned with `columns`; `None` is an
    /// absent cell
    pub rows: Vec<Vec<Option<Value>>>,
}

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Flat delimited text (CSV/TSV)
    Delimited,
    /// Excel workbook with named sheets
    Workbook,
}

impl SourceFormat {
    /// All supported formats.
    pub const ALL: &'static [SourceFormat] = &[SourceFormat::Delimited, SourceFormat::Workbook];

    /// Expected file extensions for this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            SourceFormat::Delimited => &["csv", "tsv"],
            SourceFormat::Workbook => &["xlsx", "xlsm", "xlsb", "xls"],
        }
    }

    /// Human-readable format name.
    pub fn friendly_name(&self) -> &'static str {
        match self {
            SourceFormat::Delimited => "delimited text",
            SourceFormat::Workbook => "Excel workbook",
        }
    }

    /// Detect format from the file extension.
    ///
    /// The extension is the one canonical contract; content is never
    /// sniffed. Returns `None` for unrecognized extensions, which the
    /// loader turns into a skip-with-warning.
    pub fn detect(path: &Path) -> Option<SourceFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.extensions().iter().any(|e| e.eq_ignore_ascii_case(&ext)))
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.friendly_name())
    }
}

impl std::str::FromStr for SourceFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" | "tsv" | "delimited" => Ok(SourceFormat::Delimited),
            "xlsx" | "xls" | "excel" | "workbook" => Ok(SourceFormat::Workbook),
            _ => anyhow::bail!("Unknown format: {}. Supported: csv, xlsx", s),
        }
    }
}

/// Normalize a header cell: whitespace is trimmed, and a blank header
/// gets a positional name so the column stays addressable.
pub(crate) fn header_name(raw: &str, index: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        format!("column_{}", index + 1)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimited() {
        assert_eq!(
            SourceFormat::detect(Path::new("statutes.csv")),
            Some(SourceFormat::Delimited)
        );
        assert_eq!(
            SourceFormat::detect(Path::new("statutes.TSV")),
            Some(SourceFormat::Delimited)
        );
    }

    #[test]
    fn test_detect_workbook() {
        assert_eq!(
            SourceFormat::detect(Path::new("AKHIKeyStatutesCodes.xlsx")),
            Some(SourceFormat::Workbook)
        );
        assert_eq!(
            SourceFormat::detect(Path::new("legacy.xls")),
            Some(SourceFormat::Workbook)
        );
    }

    #[test]
    fn test_detect_unknown_extension() {
        assert_eq!(SourceFormat::detect(Path::new("notes.txt")), None);
        assert_eq!(SourceFormat::detect(Path::new("no_extension")), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(
            "csv".parse::<SourceFormat>().unwrap(),
            SourceFormat::Delimited
        );
        assert_eq!(
            "excel".parse::<SourceFormat>().unwrap(),
            SourceFormat::Workbook
        );
        assert!("parquet".parse::<SourceFormat>().is_err());
    }

    #[test]
    fn test_extensions() {
        assert!(SourceFormat::Delimited.extensions().contains(&"csv"));
        assert!(SourceFormat::Workbook.extensions().contains(&"xlsx"));
    }

    #[test]
    fn test_header_name() {
        assert_eq!(header_name("  State ", 0), "State");
        assert_eq!(header_name("", 0), "column_1");
        assert_eq!(header_name("   ", 4), "column_5");
    }
}
