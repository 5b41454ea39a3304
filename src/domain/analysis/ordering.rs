//! Ordering and order-statistic helpers shared by the analyses.

use std::cmp::Ordering;

use crate::domain::inventory::NormalizedRecord;

/// Indices of `records` sorted by `valor_total` descending.
///
/// The sort is stable, so equal values keep their input order. Every
/// analysis that ranks by value goes through here to agree on tie-breaks.
pub fn value_descending_order(records: &[NormalizedRecord]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| {
        records[b]
            .valor_total
            .partial_cmp(&records[a].valor_total)
            .unwrap_or(Ordering::Equal)
    });
    order
}

/// Median of a sample; the mean of the two middle values for even sizes.
///
/// Returns 0 for an empty sample.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
