use std::collections::BTreeMap;

use serde::Serialize;

use crate::normalize::CanonicalKey;

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Summed quantity per canonical key for one source.
pub type AggregatedQuantity = BTreeMap<CanonicalKey, f64>;

/// Row accounting for one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    /// Data rows after the header.
    pub rows_seen: usize,
    /// Rows rejected by the source's row filter.
    pub rows_filtered: usize,
    /// Rows without a usable identifier.
    pub rows_without_key: usize,
    /// Rows that contributed to a total.
    pub rows_counted: usize,
    /// Counted rows whose quantity cell was blank or unparsable.
    pub quantity_defaulted: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SourceAggregate {
    pub totals: AggregatedQuantity,
    pub stats: AggregateStats,
}

// ---------------------------------------------------------------------------
// Discrepancies
// ---------------------------------------------------------------------------

/// Which sources reported a key at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Both,
    OnlyA,
    OnlyB,
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Both => write!(f, "both"),
            Self::OnlyA => write!(f, "only_a"),
            Self::OnlyB => write!(f, "only_b"),
        }
    }
}

/// A canonical key whose summed quantities differ between the sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscrepancyRecord {
    pub key: CanonicalKey,
    pub quantity_a: f64,
    pub quantity_b: f64,
    /// `quantity_b - quantity_a`
    pub difference: f64,
    pub presence: Presence,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub keys_a: usize,
    pub keys_b: usize,
    /// Size of the key union.
    pub keys_compared: usize,
    pub discrepancies: usize,
    pub only_a: usize,
    pub only_b: usize,
    pub stats_a: AggregateStats,
    pub stats_b: AggregateStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub source_a: String,
    pub source_b: String,
    pub engine_version: String,
    pub run_at: String,
}

/// Immutable outcome of one comparison run.
#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub discrepancies: Vec<DiscrepancyRecord>,
}

impl ReconResult {
    pub fn is_reconciled(&self) -> bool {
        self.discrepancies.is_empty()
    }
}
