//! Dashboard aggregations over accident records.
//!
//! Each function here is the local counterpart of one dashboard API
//! endpoint, so a dataset export can be analysed without the backend:
//! - Summary cards and overall statistics
//! - Chart series (monthly, sectors, locations)
//! - Safety record and recommended actions
//! - Incident listing pages

pub mod actions;
pub mod charts;
pub mod dashboard;
pub mod safety;

// Re-export main functions
pub use actions::next_actions;
pub use charts::{location_series, month_label, monthly_series, sector_series, MonthRange};
pub use dashboard::{body_part_counts, dashboard_stats, paginate, period_days, share, statistics};
pub use safety::{is_severe, safety_record};

use std::collections::BTreeMap;

/// Occurrences of each key, ordered by key
pub(crate) fn count_by<K: Ord>(keys: impl IntoIterator<Item = K>) -> BTreeMap<K, u64> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Counts sorted by count descending, ties by key ascending
pub(crate) fn ranked<K: Ord>(counts: BTreeMap<K, u64>) -> Vec<(K, u64)> {
    let mut entries: Vec<(K, u64)> = counts.into_iter().collect();
    // stable sort keeps key order among equal counts
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_ties_by_key() {
        let counts = count_by(["b", "a", "c", "c"]);
        assert_eq!(ranked(counts), vec![("c", 2), ("a", 1), ("b", 1)]);
    }
}
