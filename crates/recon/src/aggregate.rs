use crate::cell::{cell_at, CellValue, RawRow};
use crate::config::SourceConfig;
use crate::model::SourceAggregate;
use crate::normalize::{CanonicalKey, KeyTransform};

/// Row qualification and column layout for one source.
#[derive(Debug, Clone)]
pub struct SourcePolicy {
    pub header_rows: usize,
    pub key_column: usize,
    pub quantity_column: usize,
    pub key_transform: KeyTransform,
    pub filter: Option<ColumnEquals>,
}

/// Row predicate: trimmed cell text equals one of the accepted literals.
#[derive(Debug, Clone)]
pub struct ColumnEquals {
    pub column: usize,
    pub values: Vec<String>,
}

impl ColumnEquals {
    pub fn matches(&self, row: &[CellValue]) -> bool {
        let cell = cell_at(row, self.column).as_text();
        let cell = cell.trim();
        self.values.iter().any(|v| v == cell)
    }
}

impl SourcePolicy {
    pub fn from_config(config: &SourceConfig) -> Self {
        Self {
            header_rows: config.header_rows,
            key_column: config.columns.key.index(),
            quantity_column: config.columns.quantity.index(),
            key_transform: config.key_transform,
            filter: config.filter.as_ref().map(|f| ColumnEquals {
                column: f.column.index(),
                values: f.values.clone(),
            }),
        }
    }

    /// Whether the row passes the source's filter. Rows without a filter always pass.
    pub fn qualifies(&self, row: &[CellValue]) -> bool {
        self.filter.as_ref().map_or(true, |f| f.matches(row))
    }
}

/// Sum quantities per canonical key over the data rows of one source.
pub fn aggregate(rows: &[RawRow], policy: &SourcePolicy) -> SourceAggregate {
    let mut out = SourceAggregate::default();

    for row in rows.iter().skip(policy.header_rows) {
        out.stats.rows_seen += 1;

        if !policy.qualifies(row) {
            out.stats.rows_filtered += 1;
            continue;
        }

        let raw_key = cell_at(row, policy.key_column).as_text();
        let Some(key) = CanonicalKey::with_transform(&raw_key, policy.key_transform) else {
            out.stats.rows_without_key += 1;
            continue;
        };

        let quantity = match cell_at(row, policy.quantity_column).try_quantity() {
            Some(q) => q,
            None => {
                out.stats.quantity_defaulted += 1;
                0.0
            }
        };

        *out.totals.entry(key).or_insert(0.0) += quantity;
        out.stats.rows_counted += 1;
    }

    out
}
