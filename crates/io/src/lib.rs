// Row extraction and export for reconciliation runs

pub mod csv;
pub mod error;
pub mod json;
pub mod xlsx;

use std::path::Path;

use shipmatch_recon::config::LabelConfig;
use shipmatch_recon::{RawRow, ReconResult};

pub use error::{ExportError, ExtractError};

/// Sheet name used for xlsx exports.
pub const EXPORT_SHEET_NAME: &str = "Discrepancies";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Excel,
    Delimited,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match extension(path).as_deref() {
            Some("xlsx" | "xlsm" | "xls" | "xlsb" | "ods") => Some(Self::Excel),
            Some("csv" | "tsv" | "txt") => Some(Self::Delimited),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match extension(path).as_deref() {
            Some("xlsx") => Some(Self::Xlsx),
            Some("csv") => Some(Self::Csv),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Extract all rows (header included) of a source file, by extension.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, ExtractError> {
    match InputFormat::from_path(path) {
        Some(InputFormat::Excel) => xlsx::read_rows(path),
        Some(InputFormat::Delimited) => csv::read_rows(path),
        None => Err(ExtractError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Write the run's discrepancies to `path`, format chosen by extension.
pub fn export(result: &ReconResult, labels: &LabelConfig, path: &Path) -> Result<(), ExportError> {
    match OutputFormat::from_path(path) {
        Some(OutputFormat::Xlsx) => xlsx::export(&result.discrepancies, labels, EXPORT_SHEET_NAME, path),
        Some(OutputFormat::Csv) => csv::export(&result.discrepancies, labels, path),
        Some(OutputFormat::Json) => json::export(result, path),
        None => Err(ExportError::UnsupportedFormat(path.display().to_string())),
    }
}
