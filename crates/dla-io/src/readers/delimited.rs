//! Flat delimited-file reading.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use dla_core::{DlaError, DlaResult, Value};

use super::{header_name, RawSheet};

/// Read a delimited file as one raw sheet named after the file stem.
///
/// The first record is the header row. Cell values are trimmed and blank
/// cells are absent. Rows longer than the header are truncated to it;
/// shorter rows leave their trailing columns absent. A `.tsv` extension
/// switches the delimiter to tab.
///
/// Any record-level parse failure fails the whole file, so a flat source
/// contributes either all of its rows or none.
pub fn read_delimited(path: &Path) -> DlaResult<RawSheet> {
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    };

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| DlaError::Parse(format!("header row: {}", e)))?
        .iter()
        .enumerate()
        .map(|(i, h)| header_name(h, i))
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DlaError::Parse(e.to_string()))?;
        let cells: Vec<Option<Value>> = (0..columns.len())
            .map(|i| {
                record
                    .get(i)
                    .map(str::trim)
                    .filter(|cell| !cell.is_empty())
                    .map(Value::text)
            })
            .collect();
        rows.push(cells);
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sheet")
        .to_string();

    Ok(RawSheet {
        name,
        columns,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).expect("create fixture");
        file.write_all(content.as_bytes()).expect("write fixture");
        path
    }

    #[test]
    fn test_reads_rows_and_trims() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = write_fixture(
            &dir,
            "statutes.csv",
            " State , Local Authority \nAlaska, yes \nHawaii,\n",
        );

        let sheet = read_delimited(&path).expect("read");
        assert_eq!(sheet.name, "statutes");
        assert_eq!(sheet.columns, ["State", "Local Authority"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0][0], Some(Value::text("Alaska")));
        assert_eq!(sheet.rows[0][1], Some(Value::text("yes")));
        assert_eq!(sheet.rows[1][1], None);
    }

    #[test]
    fn test_blank_header_gets_positional_name() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = write_fixture(&dir, "odd.csv", "State,,Notes\nOhio,x,y\n");

        let sheet = read_delimited(&path).expect("read");
        assert_eq!(sheet.columns, ["State", "column_2", "Notes"]);
    }

    #[test]
    fn test_short_rows_leave_trailing_absent() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = write_fixture(&dir, "ragged.csv", "A,B,C\n1\n1,2,3,4\n");

        let sheet = read_delimited(&path).expect("read");
        assert_eq!(sheet.rows[0], vec![Some(Value::text("1")), None, None]);
        // extra cells beyond the header are dropped
        assert_eq!(sheet.rows[1].len(), 3);
    }

    #[test]
    fn test_tsv_delimiter() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = write_fixture(&dir, "tabbed.tsv", "State\tTheme\nIowa\tMutual Aid\n");

        let sheet = read_delimited(&path).expect("read");
        assert_eq!(sheet.columns, ["State", "Theme"]);
        assert_eq!(sheet.rows[0][1], Some(Value::text("Mutual Aid")));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_delimited(Path::new("/no/such/file.csv")).unwrap_err();
        assert!(matches!(err, DlaError::Io(_)));
    }
}
