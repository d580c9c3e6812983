// CSV/TSV import, discrepancy export

use std::io::Read;
use std::path::Path;

use shipmatch_recon::cell::format_number;
use shipmatch_recon::config::LabelConfig;
use shipmatch_recon::{CellValue, DiscrepancyRecord, RawRow};

use crate::error::{ExportError, ExtractError};

/// Read every record of a delimited text file as a row, header included.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, ExtractError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    rows_from_str(&content, delimiter)
}

pub fn rows_from_str(content: &str, delimiter: u8) -> Result<Vec<RawRow>, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ExtractError::Parse(e.to_string()))?;
        rows.push(record.iter().map(CellValue::text).collect());
    }
    Ok(rows)
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // More columns break ties
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, ExtractError> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| ExtractError::Open(format!("{}: {e}", path.display())))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| ExtractError::Open(format!("{}: {e}", path.display())))?;
    Ok(decode_text(bytes))
}

fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => match s.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => s,
        },
        Err(e) => {
            let bytes = e.into_bytes();
            log::debug!("input is not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// Write discrepancies as CSV with a header row of `labels`.
pub fn export(
    records: &[DiscrepancyRecord],
    labels: &LabelConfig,
    path: &Path,
) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(|e| ExportError::Write(format!("{}: {e}", path.display())))?;

    writer
        .write_record(labels.headers())
        .map_err(|e| ExportError::Write(e.to_string()))?;

    for r in records {
        writer
            .write_record([
                r.key.to_string(),
                format_number(r.quantity_a),
                format_number(r.quantity_b),
                format_number(r.difference),
            ])
            .map_err(|e| ExportError::Write(e.to_string()))?;
    }

    writer.flush().map_err(|e| ExportError::Write(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use shipmatch_recon::{CanonicalKey, Presence};

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "Name;Age;City\nAlice;30;Paris\nBob;25;London\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "Name,Age,City\nAlice,30,Paris\nBob,25,London\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "Name\tAge\tCity\nAlice\t30\tParis\nBob\t25\tLondon\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_semicolon_with_commas_in_values() {
        let content = "Name;Address;City\n\"Doe, Jane\";\"123 Main St, Apt 4\";Paris\nBob;\"456 Elm\";London\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_read_rows_keeps_header_and_blanks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("b.csv");
        fs::write(&path, "\u{feff}日期;客戶;單號\n2026/03/02;;ORD1-1\n").unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], CellValue::text("日期"));
        assert!(rows[1][1].is_empty());
        assert_eq!(rows[1][2], CellValue::text("ORD1-1"));
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        // "Caf\xe9,1" in Windows-1252
        fs::write(&path, b"name,qty\nCaf\xe9,1\n").unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows[1][0], CellValue::text("Café"));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = read_rows(Path::new("/nonexistent/shipmatch.csv")).unwrap_err();
        assert!(matches!(err, ExtractError::Open(_)));
    }

    #[test]
    fn test_export_discrepancies() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diff.csv");
        let records = vec![DiscrepancyRecord {
            key: CanonicalKey::from_raw("ORD1").unwrap(),
            quantity_a: 5.0,
            quantity_b: 7.5,
            difference: 2.5,
            presence: Presence::Both,
        }];

        export(&records, &LabelConfig::default(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("訂單號碼,全日物流數量,同興出庫數量,差異"));
        assert_eq!(lines.next(), Some("ORD1,5,7.5,2.5"));
        assert_eq!(lines.next(), None);
    }
}
