//! Dataset loading from spreadsheets and comma-delimited text
//!
//! The file is read once. A spreadsheet parse (first sheet) is tried
//! first; if the bytes are not a workbook the same bytes are parsed as CSV.
//! The first row is always the header.

use std::io::{self, Cursor};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::{Cell, Dataset};
use crate::common::{Error, Result};

/// Load a dataset from `path`
pub fn load(path: &Path) -> Result<Dataset> {
    let shown = path.display().to_string();

    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound(shown.clone()),
        io::ErrorKind::PermissionDenied => Error::PermissionDenied(shown.clone()),
        _ => Error::FileRead {
            path: shown.clone(),
            error: e.to_string(),
        },
    })?;

    let dataset = match parse_spreadsheet(&bytes, &shown) {
        Ok(dataset) => dataset,
        Err(SpreadsheetError::NotAWorkbook(reason)) => {
            tracing::debug!("'{}' is not a workbook ({}), trying CSV", shown, reason);
            parse_csv(&bytes, &shown).map_err(|e| match e {
                Error::UnsupportedFormat { path, reason: csv_reason } => Error::UnsupportedFormat {
                    path,
                    reason: format!("spreadsheet: {}; csv: {}", reason, csv_reason),
                },
                other => other,
            })?
        }
        Err(SpreadsheetError::Fatal(e)) => return Err(e),
    };

    tracing::info!(
        "Loaded {} row(s) with columns {:?} from {}",
        dataset.len(),
        dataset.columns(),
        shown
    );

    Ok(dataset)
}

/// Outcome of a failed workbook parse
enum SpreadsheetError {
    /// Bytes are not a recognised workbook; CSV should be tried
    NotAWorkbook(String),
    /// Bytes are a workbook but unusable
    Fatal(Error),
}

fn parse_spreadsheet(bytes: &[u8], shown: &str) -> std::result::Result<Dataset, SpreadsheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| SpreadsheetError::NotAWorkbook(e.to_string()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => {
            return Err(SpreadsheetError::Fatal(Error::unsupported_format(shown, e)));
        }
        None => return Err(SpreadsheetError::Fatal(Error::MissingHeader(shown.to_string()))),
    };

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| SpreadsheetError::Fatal(Error::MissingHeader(shown.to_string())))?;

    let columns = header.iter().map(|c| c.to_string().trim().to_string()).collect();
    let records = rows.map(|row| row.iter().map(cell_from_data).collect()).collect();

    Ok(Dataset::new(columns, records))
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::from_text(&other.to_string()),
    }
}

fn parse_csv(bytes: &[u8], shown: &str) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| Error::unsupported_format(shown, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(Error::MissingHeader(shown.to_string()));
    }

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::unsupported_format(shown, e))?;
        records.push(record.iter().map(Cell::from_text).collect());
    }

    Ok(Dataset::new(columns, records))
}
