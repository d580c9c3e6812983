use std::collections::BTreeSet;

use crate::model::{AggregatedQuantity, DiscrepancyRecord, Presence};

/// Compare two aggregated sources over the union of their keys.
///
/// A key missing on one side counts as zero there. Only keys whose totals
/// differ (exact float comparison) are returned, sorted ascending by key.
pub fn reconcile(a: &AggregatedQuantity, b: &AggregatedQuantity) -> Vec<DiscrepancyRecord> {
    let keys: BTreeSet<_> = a.keys().chain(b.keys()).collect();

    keys.into_iter()
        .filter_map(|key| {
            let in_a = a.get(key).copied();
            let in_b = b.get(key).copied();
            let quantity_a = in_a.unwrap_or(0.0);
            let quantity_b = in_b.unwrap_or(0.0);

            if quantity_a == quantity_b {
                return None;
            }

            let presence = match (in_a, in_b) {
                (Some(_), Some(_)) => Presence::Both,
                (Some(_), None) => Presence::OnlyA,
                (None, _) => Presence::OnlyB,
            };

            Some(DiscrepancyRecord {
                key: key.clone(),
                quantity_a,
                quantity_b,
                difference: quantity_b - quantity_a,
                presence,
            })
        })
        .collect()
}
