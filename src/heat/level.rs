//! Heat level quantization.
//!
//! A region's heat level encodes its share of the busiest region's count
//! on a 0-10 scale, split into four display bands:
//!
//! | share of max   | levels | band    |
//! |----------------|--------|---------|
//! | (0%, 25%]      | 1-3    | minimal |
//! | (25%, 50%]     | 4-5    | low     |
//! | (50%, 75%]     | 6-7    | medium  |
//! | (75%, 100%]    | 8-10   | high    |
//!
//! Boundary values belong to the lower band. All arithmetic is done on
//! integers so that levels are bit-exact for any input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Highest heat level
pub const MAX_HEAT_LEVEL: u8 = 10;

/// Display band of a non-zero heat level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatBand {
    /// Levels 1-3, yellow
    Minimal,
    /// Levels 4-5, orange
    Low,
    /// Levels 6-7, light red
    Medium,
    /// Levels 8-10, strong red
    High,
}

impl HeatBand {
    pub const ALL: [HeatBand; 4] = [HeatBand::Minimal, HeatBand::Low, HeatBand::Medium, HeatBand::High];

    /// Band for a heat level, `None` for level 0
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => None,
            1..=3 => Some(HeatBand::Minimal),
            4..=5 => Some(HeatBand::Low),
            6..=7 => Some(HeatBand::Medium),
            _ => Some(HeatBand::High),
        }
    }

    /// Inclusive level range covered by this band
    pub fn levels(self) -> (u8, u8) {
        match self {
            HeatBand::Minimal => (1, 3),
            HeatBand::Low => (4, 5),
            HeatBand::Medium => (6, 7),
            HeatBand::High => (8, MAX_HEAT_LEVEL),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeatBand::Minimal => "minimal",
            HeatBand::Low => "low",
            HeatBand::Medium => "medium",
            HeatBand::High => "high",
        }
    }

    /// Color name used on the dashboard legend
    pub fn color_name(self) -> &'static str {
        match self {
            HeatBand::Minimal => "yellow",
            HeatBand::Low => "orange",
            HeatBand::Medium => "light red",
            HeatBand::High => "strong red",
        }
    }
}

impl fmt::Display for HeatBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes heat levels for a set of named buckets
///
/// **Public** - main entry point for heat normalization
#[derive(Debug, Clone, Copy, Default)]
pub struct HeatLevelCalculator;

impl HeatLevelCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the heat level of every bucket relative to the largest one
    ///
    /// # Arguments
    /// * `counts` - Raw count per bucket
    ///
    /// # Returns
    /// Level in `0..=10` per bucket, same keys as the input
    pub fn compute<K: Ord + Clone>(&self, counts: &BTreeMap<K, u64>) -> BTreeMap<K, u8> {
        let max_count = max_count(counts.values().copied());

        counts
            .iter()
            .map(|(key, &count)| (key.clone(), heat_level(count, max_count)))
            .collect()
    }
}

/// Largest count, 0 for an empty set
pub fn max_count(counts: impl IntoIterator<Item = u64>) -> u64 {
    counts.into_iter().max().unwrap_or(0)
}

/// Heat level of `count` relative to `max_count`
///
/// Counts above `max_count` are treated as the maximum.
pub fn heat_level(count: u64, max_count: u64) -> u8 {
    if count == 0 || max_count == 0 {
        return 0;
    }

    // percentage = 100 * c / m, every threshold below is that comparison
    // multiplied through by m
    let c = u128::from(count.min(max_count));
    let m = u128::from(max_count);

    let level = if 4 * c <= m {
        // ceil(percentage / 25 * 3)
        let raw = (12 * c).div_ceil(m);
        raw.clamp(1, 3)
    } else if 2 * c <= m {
        // 4 + floor((percentage - 25) / 25 * 2)
        (4 + (8 * c - 2 * m) / m).min(5)
    } else if 4 * c <= 3 * m {
        // 6 + floor((percentage - 50) / 25 * 2)
        (6 + (8 * c - 4 * m) / m).min(7)
    } else {
        // 8 + floor((percentage - 75) / 25 * 3)
        (8 + (12 * c - 9 * m) / m).min(u128::from(MAX_HEAT_LEVEL))
    };

    level as u8
}

/// Share of `max_count` as a percentage, for display only
pub fn percentage_of_max(count: u64, max_count: u64) -> f64 {
    if max_count == 0 {
        0.0
    } else {
        (count as f64 / max_count as f64) * 100.0
    }
}
