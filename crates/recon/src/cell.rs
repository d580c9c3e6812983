//! Tagged cell values handed over by the row extractor.

use serde::Serialize;

/// A single spreadsheet cell as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

/// One row of a source, header rows included.
pub type RawRow = Vec<CellValue>;

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// String rendering used for identifier and type columns.
    ///
    /// Integral numbers print without a decimal point so that a numeric
    /// order number stored as `12345.0` still joins against the text `12345`.
    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
        }
    }

    /// Quantity value of the cell. Anything unparsable counts as zero.
    pub fn quantity(&self) -> f64 {
        self.try_quantity().unwrap_or(0.0)
    }

    /// Like [`quantity`](Self::quantity) but reports whether the cell held a number.
    pub fn try_quantity(&self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Number(n) if n.is_nan() => None,
            Self::Number(n) => Some(*n),
            Self::Text(s) => parse_float_prefix(s),
        }
    }
}

/// Read a cell by index; positions past the end of the row are blank.
pub fn cell_at(row: &[CellValue], idx: usize) -> &CellValue {
    const EMPTY: &CellValue = &CellValue::Empty;
    row.get(idx).unwrap_or(EMPTY)
}

pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Parse the longest leading decimal number of `s`.
///
/// Leading whitespace is skipped, trailing garbage is ignored (`"12pcs"` is 12).
/// Returns `None` when no digit is found before the first non-numeric character.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            end = j;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut j = end + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().ok()
}
