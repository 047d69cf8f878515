//! XLSX rendering of a report

use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

use super::Report;
use crate::common::{Error, Result};
use crate::dataset::Cell;

/// Write the report to `path`
///
/// The workbook is saved to a temporary file next to `path` and then moved
/// into place, so `path` only ever holds a complete report.
pub fn write_xlsx(report: &Report<'_>, path: &Path) -> Result<()> {
    let shown = path.display().to_string();

    let mut workbook = build_workbook(report).map_err(|e| Error::report_write(&shown, e))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staging = tempfile::Builder::new()
        .prefix(".qna-report-")
        .suffix(".xlsx")
        .tempfile_in(dir)
        .map_err(|e| Error::report_write(&shown, e))?;

    workbook
        .save(staging.path())
        .map_err(|e| Error::report_write(&shown, e))?;

    staging
        .persist(path)
        .map_err(|e| Error::report_write(&shown, e.error))?;

    tracing::info!("Report written to {}", shown);
    Ok(())
}

fn build_workbook(report: &Report<'_>) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let highlight = Format::new().set_background_color(Color::Red);

    let worksheet = workbook.add_worksheet();

    for (col, name) in report.header().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (i, cells) in report.rows().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            write_cell(worksheet, row, col as u16, cell, &highlight)?;
        }
    }

    Ok(workbook)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    highlight: &Format,
) -> std::result::Result<(), XlsxError> {
    match cell {
        Cell::Empty => {}
        Cell::Text(text) if Report::is_highlighted(cell) => {
            worksheet.write_string_with_format(row, col, text, highlight)?;
        }
        Cell::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
        Cell::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        Cell::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}
