//! Output JSON schema for heatmap reports.
//!
//! Schema is versioned to allow future evolution.

use super::level::HeatBand;
use super::regions::{heat_results, BodyRegionCount, RegionMap};
use crate::api::types::BodyPartCount;
use crate::state::Filters;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Heat of one body-map region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatResult {
    pub region_id: String,
    pub count: u64,
    /// 0-10
    pub level: u8,
    /// Share of the busiest region, display only
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<HeatBand>,
}

/// Top-level heatmap report written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// API URL or dataset path the counts came from
    pub source: String,

    /// Filters the aggregate was computed with
    pub filters: Filters,

    /// Largest region count
    pub max_count: u64,

    /// One entry per region, in region table order
    pub regions: Vec<HeatResult>,

    /// Aggregate labels that no region claims
    #[serde(default)]
    pub unmatched_labels: Vec<BodyPartCount>,

    /// Timestamp when the report was generated (RFC 3339)
    pub generated_at: String,
}

impl HeatmapReport {
    pub fn hottest(&self) -> Option<&HeatResult> {
        self.regions
            .iter()
            .filter(|r| r.count > 0)
            .max_by(|a, b| a.count.cmp(&b.count).then_with(|| b.region_id.cmp(&a.region_id)))
    }
}

/// Build a report from a body-part aggregate
///
/// **Public** - rolls the aggregate up into regions and computes heat levels
pub fn to_report(
    source: impl Into<String>,
    filters: &Filters,
    aggregate: &[BodyPartCount],
    regions: &RegionMap,
) -> HeatmapReport {
    let counts: Vec<BodyRegionCount> = regions.roll_up(aggregate);
    let results = heat_results(&counts);
    let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0);

    HeatmapReport {
        version: SCHEMA_VERSION.to_string(),
        source: source.into(),
        filters: filters.clone(),
        max_count,
        regions: results,
        unmatched_labels: regions.unmatched(aggregate),
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_report() {
        let aggregate = vec![
            BodyPartCount::new("Mão", 8),
            BodyPartCount::new("Pé", 2),
            BodyPartCount::new("Unha", 1),
        ];

        let report = to_report("test.json", &Filters::new(), &aggregate, &RegionMap::default());

        assert_eq!(report.version, SCHEMA_VERSION);
        assert_eq!(report.max_count, 8);
        assert_eq!(report.regions.len(), 8);
        assert_eq!(report.hottest().map(|r| r.region_id.as_str()), Some("hands"));
        assert_eq!(report.unmatched_labels, vec![BodyPartCount::new("Unha", 1)]);

        let feet = report.regions.iter().find(|r| r.region_id == "feet").unwrap();
        assert_eq!(feet.level, 3);
    }
}
