use crate::aggregate::{aggregate, SourcePolicy};
use crate::cell::RawRow;
use crate::config::ReconConfig;
use crate::error::{ReconError, Source};
use crate::model::{
    Presence, ReconMeta, ReconResult, ReconSummary, SourceAggregate,
};
use crate::reconcile::reconcile;

/// Extracted rows of both sources, header rows included.
#[derive(Debug, Clone, Default)]
pub struct ReconInput {
    pub source_a: Option<Vec<RawRow>>,
    pub source_b: Option<Vec<RawRow>>,
}

/// Check that both inputs were supplied, source A first.
///
/// Works on anything (paths, byte buffers, rows) so callers can fail before
/// reading or parsing a single file.
pub fn require_inputs<T>(a: Option<T>, b: Option<T>) -> Result<(T, T), ReconError> {
    let a = a.ok_or(ReconError::MissingInput(Source::A))?;
    let b = b.ok_or(ReconError::MissingInput(Source::B))?;
    Ok((a, b))
}

/// Run one comparison. Returns the discrepancies + summary.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let (rows_a, rows_b) = require_inputs(input.source_a.as_deref(), input.source_b.as_deref())?;

    let policy_a = SourcePolicy::from_config(&config.sources.a);
    let policy_b = SourcePolicy::from_config(&config.sources.b);

    // Each source aggregates on its own thread; reconcile waits for both.
    let (joined_a, joined_b) = std::thread::scope(|s| {
        let handle_a = s.spawn(|| aggregate(rows_a, &policy_a));
        let handle_b = s.spawn(|| aggregate(rows_b, &policy_b));
        (handle_a.join(), handle_b.join())
    });
    let agg_a = joined_a.map_err(|_| ReconError::Worker(Source::A))?;
    let agg_b = joined_b.map_err(|_| ReconError::Worker(Source::B))?;

    log_stats(Source::A, &config.sources.a.label, &agg_a);
    log_stats(Source::B, &config.sources.b.label, &agg_b);

    let discrepancies = reconcile(&agg_a.totals, &agg_b.totals);

    let keys_compared = agg_a
        .totals
        .keys()
        .filter(|k| !agg_b.totals.contains_key(*k))
        .count()
        + agg_b.totals.len();

    let summary = ReconSummary {
        keys_a: agg_a.totals.len(),
        keys_b: agg_b.totals.len(),
        keys_compared,
        discrepancies: discrepancies.len(),
        only_a: discrepancies.iter().filter(|d| d.presence == Presence::OnlyA).count(),
        only_b: discrepancies.iter().filter(|d| d.presence == Presence::OnlyB).count(),
        stats_a: agg_a.stats,
        stats_b: agg_b.stats,
    };

    log::info!(
        "compared {} key(s): {} discrepancies",
        summary.keys_compared,
        summary.discrepancies
    );

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            source_a: config.sources.a.label.clone(),
            source_b: config.sources.b.label.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        discrepancies,
    })
}

fn log_stats(source: Source, label: &str, agg: &SourceAggregate) {
    let s = &agg.stats;
    log::debug!(
        "{source} ({label}): {} row(s), {} filtered, {} without key, {} counted into {} key(s), {} quantity cell(s) read as 0",
        s.rows_seen,
        s.rows_filtered,
        s.rows_without_key,
        s.rows_counted,
        agg.totals.len(),
        s.quantity_defaulted,
    );
}
