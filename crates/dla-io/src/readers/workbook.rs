//! Excel workbook reading via calamine.

use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};

use dla_core::{DlaError, DlaResult, LoadDiagnostics, Value};

use super::{header_name, RawSheet};

/// Read every named sheet of a workbook.
///
/// Row 0 of each sheet is the header row, trimmed and positionally named
/// when blank, exactly as for flat files. A sheet whose range cannot be
/// read is recorded in `diag` and skipped; the remaining sheets still
/// load. Returns an error only when the workbook itself cannot be
/// opened.
pub fn read_workbook(path: &Path, diag: &mut LoadDiagnostics) -> DlaResult<Vec<RawSheet>> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("workbook")
        .to_string();

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| DlaError::Parse(format!("open workbook: {}", e)))?;

    let names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(names.len());
    for sheet_name in names {
        let range = match workbook.worksheet_range(&sheet_name) {
            Ok(range) => range,
            Err(e) => {
                diag.add_failed_sheet(&e.to_string(), &filename, &sheet_name);
                continue;
            }
        };

        let mut grid = range.rows();
        let columns: Vec<String> = match grid.next() {
            Some(header_row) => header_row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    header_name(&cell.as_string().unwrap_or_else(|| cell.to_string()), i)
                })
                .collect(),
            None => Vec::new(),
        };

        let rows: Vec<Vec<Option<Value>>> = grid
            .map(|row| {
                (0..columns.len())
                    .map(|i| row.get(i).and_then(cell_value))
                    .collect()
            })
            .collect();

        sheets.push(RawSheet {
            name: sheet_name,
            columns,
            rows,
        });
    }

    Ok(sheets)
}

/// Convert one typed cell. Text is trimmed and blank text is absent;
/// empty and error cells carry no value. Date serials keep their numeric
/// form.
fn cell_value(cell: &Data) -> Option<Value> {
    if let Some(s) = cell.get_string() {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        return Some(Value::text(trimmed));
    }
    if let Some(f) = cell.get_float() {
        return Some(Value::Number(f));
    }
    if let Some(i) = cell.get_int() {
        return Some(Value::Number(i as f64));
    }
    if let Some(b) = cell.get_bool() {
        return Some(Value::Bool(b));
    }
    if let Some(dt) = cell.get_datetime() {
        return Some(Value::Number(dt.as_f64()));
    }
    if let Some(s) = cell.get_datetime_iso().or_else(|| cell.get_duration_iso()) {
        return Some(Value::text(s));
    }
    None
}
