use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ReconError, Source};
use crate::normalize::KeyTransform;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Column layout of both sources plus presentation labels.
///
/// Loaded from a `*.layout.toml` file; [`ReconConfig::default`] is the layout
/// of the carrier manifest (A) and warehouse stock-out sheet (B) exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub sources: Sources,
    #[serde(default)]
    pub labels: LabelConfig,
}

fn default_name() -> String {
    "shipment reconciliation".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sources {
    pub a: SourceConfig,
    pub b: SourceConfig,
}

impl Sources {
    pub fn get(&self, source: Source) -> &SourceConfig {
        match source {
            Source::A => &self.a,
            Source::B => &self.b,
        }
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub label: String,
    /// Leading rows to skip before data starts.
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
    #[serde(default)]
    pub key_transform: KeyTransform,
    pub columns: ColumnMapping,
    /// Only rows whose filter column (trimmed) equals one of `values` qualify.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<RowFilter>,
}

fn default_header_rows() -> usize {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub key: ColumnRef,
    pub quantity: ColumnRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowFilter {
    pub column: ColumnRef,
    pub values: Vec<String>,
}

// ---------------------------------------------------------------------------
// Column references
// ---------------------------------------------------------------------------

/// Zero-based column index. Written in TOML either as a spreadsheet letter
/// (`"L"`) or as a 0-based integer (`11`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "ColumnSpec", into = "ColumnSpec")]
pub struct ColumnRef(pub usize);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ColumnSpec {
    Index(usize),
    Letter(String),
}

impl TryFrom<ColumnSpec> for ColumnRef {
    type Error = String;

    fn try_from(spec: ColumnSpec) -> Result<Self, Self::Error> {
        match spec {
            ColumnSpec::Index(i) => Ok(ColumnRef(i)),
            ColumnSpec::Letter(s) => letter_to_col(&s)
                .map(ColumnRef)
                .ok_or_else(|| format!("invalid column letter '{s}'")),
        }
    }
}

impl From<ColumnRef> for ColumnSpec {
    fn from(col: ColumnRef) -> Self {
        ColumnSpec::Letter(col_to_letter(col.0))
    }
}

impl ColumnRef {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&col_to_letter(self.0))
    }
}

/// Convert column index to spreadsheet letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn col_to_letter(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Inverse of [`col_to_letter`]; case-insensitive. `None` for anything but letters.
pub fn letter_to_col(letters: &str) -> Option<usize> {
    let letters = letters.trim();
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    let mut n: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        n = n * 26 + (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
    }
    Some(n - 1)
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Header labels of the four output columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub key: String,
    pub source_a: String,
    pub source_b: String,
    pub difference: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            key: "訂單號碼".into(),
            source_a: "全日物流數量".into(),
            source_b: "同興出庫數量".into(),
            difference: "差異".into(),
        }
    }
}

impl LabelConfig {
    pub fn headers(&self) -> [&str; 4] {
        [&self.key, &self.source_a, &self.source_b, &self.difference]
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            sources: Sources {
                // Carrier manifest: C = document type, I = shipped qty, L = customer order no.
                a: SourceConfig {
                    label: "全日物流".into(),
                    header_rows: 1,
                    key_transform: KeyTransform::StripSuffix,
                    columns: ColumnMapping {
                        key: ColumnRef(11),
                        quantity: ColumnRef(8),
                    },
                    filter: Some(RowFilter {
                        column: ColumnRef(2),
                        values: vec!["出庫".into()],
                    }),
                },
                // Warehouse stock-out: C = order no., L = quantity.
                b: SourceConfig {
                    label: "同興出庫".into(),
                    header_rows: 1,
                    key_transform: KeyTransform::StripSuffix,
                    columns: ColumnMapping {
                        key: ColumnRef(2),
                        quantity: ColumnRef(11),
                    },
                    filter: None,
                },
            },
            labels: LabelConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ReconError> {
        toml::to_string_pretty(self).map_err(|e| ReconError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        for source in [Source::A, Source::B] {
            let cfg = self.sources.get(source);

            if cfg.label.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!("{source}: label is empty")));
            }

            if cfg.columns.key == cfg.columns.quantity {
                return Err(ReconError::ConfigValidation(format!(
                    "{source}: key and quantity both read column {}",
                    cfg.columns.key
                )));
            }

            if let Some(ref filter) = cfg.filter {
                if filter.values.is_empty() {
                    return Err(ReconError::ConfigValidation(format!(
                        "{source}: filter on column {} has no values",
                        filter.column
                    )));
                }
            }
        }

        if self.labels.headers().iter().any(|h| h.trim().is_empty()) {
            return Err(ReconError::ConfigValidation("output labels must not be empty".into()));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
