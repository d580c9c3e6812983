// Excel import (xlsx, xlsm, xls, xlsb, ods) and discrepancy export (xlsx)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook};
use shipmatch_recon::config::LabelConfig;
use shipmatch_recon::{CellValue, DiscrepancyRecord, RawRow};

use crate::error::{ExportError, ExtractError};

/// Read the first worksheet of a workbook, whatever its name.
///
/// Rows and columns keep their absolute sheet positions: if the used range
/// starts below or right of A1 the leading rows/cells are filled with blanks.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, ExtractError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ExtractError::Open(format!("{}: {e}", path.display())))?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ExtractError::NoSheets(path.display().to_string()))?;

    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| ExtractError::Parse(format!("sheet '{first}': {e}")))?;

    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<RawRow> = vec![Vec::new(); start_row as usize];

    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(row.iter().map(to_cell));
        rows.push(cells);
    }

    log::debug!("{}: read {} row(s) from sheet '{first}'", path.display(), rows.len());
    Ok(rows)
}

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::text(if *b { "TRUE" } else { "FALSE" }),
        Data::Error(e) => CellValue::text(format!("#{:?}", e)),
        // Dates keep their serial number, like the sheet shows them unformatted
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}

/// Write discrepancies to a one-sheet workbook: bold frozen header row, one
/// record per row, quantities as numbers.
pub fn export(
    records: &[DiscrepancyRecord],
    labels: &LabelConfig,
    sheet_name: &str,
    path: &Path,
) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(sheet_name)
        .map_err(|e| ExportError::Write(format!("Failed to create sheet '{sheet_name}': {e}")))?;

    let bold = Format::new().set_bold();
    for (col, label) in labels.headers().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *label, &bold)
            .map_err(|e| ExportError::Write(format!("Failed to write header: {e}")))?;
    }

    for (i, r) in records.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet
            .write_string(row, 0, r.key.as_str())
            .and_then(|ws| ws.write_number(row, 1, r.quantity_a))
            .and_then(|ws| ws.write_number(row, 2, r.quantity_b))
            .and_then(|ws| ws.write_number(row, 3, r.difference))
            .map_err(|e| ExportError::Write(format!("Failed to write row {row}: {e}")))?;
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| ExportError::Write(format!("Failed to freeze header: {e}")))?;
    worksheet.autofit();

    workbook
        .save(path)
        .map_err(|e| ExportError::Write(format!("Failed to save XLSX file: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    use shipmatch_recon::{CanonicalKey, Presence};

    fn record(key: &str, a: f64, b: f64) -> DiscrepancyRecord {
        DiscrepancyRecord {
            key: CanonicalKey::from_raw(key).unwrap(),
            quantity_a: a,
            quantity_b: b,
            difference: b - a,
            presence: Presence::Both,
        }
    }

    #[test]
    fn test_export_then_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diff.xlsx");
        let records = vec![record("ORD1", 5.0, 7.0), record("ORD2", 3.0, 0.0)];

        export(&records, &LabelConfig::default(), "Discrepancies", &path).unwrap();
        let rows = read_rows(&path).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], CellValue::text("訂單號碼"));
        assert_eq!(rows[0][3], CellValue::text("差異"));
        assert_eq!(rows[1][0], CellValue::text("ORD1"));
        assert_eq!(rows[1][3].quantity(), 2.0);
        assert_eq!(rows[2][3].quantity(), -3.0);
    }

    #[test]
    fn test_only_first_sheet_is_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two.xlsx");

        let mut wb = Workbook::new();
        let first = wb.add_worksheet();
        first.set_name("出貨單").unwrap();
        first.write_string(0, 0, "first").unwrap();
        let second = wb.add_worksheet();
        second.write_string(0, 0, "second").unwrap();
        wb.save(&path).unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], CellValue::text("first"));
    }

    #[test]
    fn test_offset_range_keeps_absolute_positions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");

        let mut wb = Workbook::new();
        let ws = wb.add_worksheet();
        ws.write_string(1, 2, "ORD9").unwrap();
        ws.write_number(1, 3, 4.0).unwrap();
        wb.save(&path).unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_empty());
        assert!(rows[1][0].is_empty());
        assert_eq!(rows[1][2], CellValue::text("ORD9"));
        assert_eq!(rows[1][3], CellValue::Number(4.0));
    }

    #[test]
    fn test_unreadable_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip").unwrap();
        assert!(read_rows(&path).is_err());
    }
}
