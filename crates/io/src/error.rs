use std::fmt;

/// Failure turning a source file into rows.
#[derive(Debug)]
pub enum ExtractError {
    /// File extension not recognised as a spreadsheet or delimited text.
    UnsupportedFormat(String),
    /// File could not be opened or read.
    Open(String),
    /// Workbook has no worksheet to read.
    NoSheets(String),
    /// File opened but its contents could not be parsed.
    Parse(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat(path) => write!(f, "unsupported input format: {path}"),
            Self::Open(msg) => write!(f, "cannot open input: {msg}"),
            Self::NoSheets(path) => write!(f, "{path}: workbook contains no sheets"),
            Self::Parse(msg) => write!(f, "cannot parse input: {msg}"),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Failure writing the export artifact.
#[derive(Debug)]
pub enum ExportError {
    UnsupportedFormat(String),
    Write(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat(path) => {
                write!(f, "unsupported export format: {path} (expected .xlsx, .csv or .json)")
            }
            Self::Write(msg) => write!(f, "export failed: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}
