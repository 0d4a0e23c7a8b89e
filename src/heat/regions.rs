//! Grouping of raw body-part labels into body-map regions.
//!
//! The dataset records free-text body-part labels ("Mão Direita", "Dedos",
//! ...). The body map only has a handful of regions, each fed by several
//! labels. The grouping table is configuration: a built-in default mirrors
//! the dashboard's SVG, and a JSON file can replace it.

use super::level::{heat_level, max_count, percentage_of_max, HeatBand};
use super::schema::HeatResult;
use crate::api::types::BodyPartCount;
use crate::utils::config::UNSPECIFIED_BODY_PART;
use crate::utils::error::RegionError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// One region of the body map and the raw labels it aggregates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDefinition {
    pub id: String,
    pub labels: Vec<String>,
}

impl RegionDefinition {
    pub fn new(id: impl Into<String>, labels: &[&str]) -> Self {
        Self {
            id: id.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Ordered region table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMap {
    pub regions: Vec<RegionDefinition>,
}

/// Count of one region after summing its labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyRegionCount {
    pub region_id: String,
    pub raw_labels: Vec<String>,
    pub count: u64,
}

impl Default for RegionMap {
    fn default() -> Self {
        // Arm labels without a side count towards both arms
        Self {
            regions: vec![
                RegionDefinition::new(
                    "hands",
                    &["Mãos e Dedos", "Dedos", "Mão", "Mão Esquerda", "Mão Direita", "Mãos", "Dedo"],
                ),
                RegionDefinition::new(
                    "feet",
                    &["Pés e Dedos dos Pés", "Tornozelo", "Pé", "Pé Esquerdo", "Pé Direito", "Pés"],
                ),
                RegionDefinition::new("eyes", &["Olhos", "Olho"]),
                RegionDefinition::new("head", &["Cabeça", "Face", "Crânio", "Rosto", "Orelha"]),
                RegionDefinition::new(
                    "legs",
                    &["Joelho", "Perna", "Coxa", "Perna Esquerda", "Perna Direita", "Pernas"],
                ),
                RegionDefinition::new(
                    "trunk",
                    &["Tronco", "Costas", "Peito", "Abdômen", "Abdomen", "Tórax", "Quadril", "Pescoço"],
                ),
                RegionDefinition::new(
                    "arms-left",
                    &["Braço", "Cotovelo", "Antebraço", "Braço Esquerdo", "Braços"],
                ),
                RegionDefinition::new(
                    "arms-right",
                    &["Braço", "Cotovelo", "Antebraço", "Braço Direito", "Braços"],
                ),
            ],
        }
    }
}

impl RegionMap {
    /// Build a table, rejecting empty or duplicate region ids
    pub fn new(regions: Vec<RegionDefinition>) -> Result<Self, RegionError> {
        let map = Self { regions };
        map.validate()?;
        Ok(map)
    }

    /// Load a region table from a JSON file
    ///
    /// **Public** - used by the `--regions` CLI option
    ///
    /// # Format
    /// ```json
    /// { "regions": [ { "id": "hands", "labels": ["Mão", "Dedos"] } ] }
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegionError> {
        let path = path.as_ref();
        debug!("Reading region table from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let map: RegionMap = serde_json::from_str(&content)?;
        map.validate()?;

        info!("Loaded {} regions from {}", map.regions.len(), path.display());
        Ok(map)
    }

    fn validate(&self) -> Result<(), RegionError> {
        if self.regions.is_empty() {
            return Err(RegionError::Empty);
        }

        let mut seen = HashSet::new();
        for region in &self.regions {
            if region.id.trim().is_empty() {
                return Err(RegionError::EmptyId);
            }
            if !seen.insert(region.id.as_str()) {
                return Err(RegionError::DuplicateId(region.id.clone()));
            }
        }

        Ok(())
    }

    pub fn region_ids(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.id.as_str())
    }

    /// Sum the aggregate into regions, in table order
    ///
    /// A label missing from the aggregate contributes 0. Repeated entries
    /// for the same label are summed. The "unspecified" label never counts.
    /// Sums saturate at `u64::MAX`.
    pub fn roll_up(&self, aggregate: &[BodyPartCount]) -> Vec<BodyRegionCount> {
        let by_label = index_aggregate(aggregate);

        self.regions
            .iter()
            .map(|region| {
                let count = region
                    .labels
                    .iter()
                    .map(|label| by_label.get(label.as_str()).copied().unwrap_or(0))
                    .fold(0u64, u64::saturating_add);

                BodyRegionCount {
                    region_id: region.id.clone(),
                    raw_labels: region.labels.clone(),
                    count,
                }
            })
            .collect()
    }

    /// Aggregate entries no region claims
    pub fn unmatched(&self, aggregate: &[BodyPartCount]) -> Vec<BodyPartCount> {
        let known: HashSet<&str> = self
            .regions
            .iter()
            .flat_map(|r| r.labels.iter().map(String::as_str))
            .collect();

        aggregate
            .iter()
            .filter(|entry| entry.part != UNSPECIFIED_BODY_PART && !known.contains(entry.part.as_str()))
            .cloned()
            .collect()
    }
}

fn index_aggregate(aggregate: &[BodyPartCount]) -> HashMap<&str, u64> {
    let mut by_label: HashMap<&str, u64> = HashMap::new();
    for entry in aggregate {
        if entry.part == UNSPECIFIED_BODY_PART {
            continue;
        }
        let total = by_label.entry(entry.part.as_str()).or_insert(0);
        *total = total.saturating_add(entry.count);
    }
    by_label
}

/// Compute the heat result of every region
///
/// **Public** - applies the heat level calculator to rolled-up counts
pub fn heat_results(counts: &[BodyRegionCount]) -> Vec<HeatResult> {
    let max = max_count(counts.iter().map(|c| c.count));
    debug!("Max region count: {}", max);

    counts
        .iter()
        .map(|region| {
            let level = heat_level(region.count, max);
            HeatResult {
                region_id: region.region_id.clone(),
                count: region.count,
                level,
                percentage: percentage_of_max(region.count, max),
                band: HeatBand::from_level(level),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_up_sums_labels() {
        let aggregate = vec![
            BodyPartCount::new("Mão Direita", 4),
            BodyPartCount::new("Dedos", 6),
            BodyPartCount::new("Olhos", 1),
        ];

        let counts = RegionMap::default().roll_up(&aggregate);
        let hands = counts.iter().find(|c| c.region_id == "hands").unwrap();
        let feet = counts.iter().find(|c| c.region_id == "feet").unwrap();

        assert_eq!(hands.count, 10);
        assert_eq!(feet.count, 0);
        assert_eq!(counts.len(), 8);
    }

    #[test]
    fn test_shared_label_feeds_both_arms() {
        let counts = RegionMap::default().roll_up(&[BodyPartCount::new("Braço", 3)]);
        let left = counts.iter().find(|c| c.region_id == "arms-left").unwrap();
        let right = counts.iter().find(|c| c.region_id == "arms-right").unwrap();

        assert_eq!(left.count, 3);
        assert_eq!(right.count, 3);
    }

    #[test]
    fn test_unspecified_is_ignored() {
        let map = RegionMap::new(vec![RegionDefinition::new("misc", &[UNSPECIFIED_BODY_PART])]).unwrap();
        let aggregate = vec![BodyPartCount::new(UNSPECIFIED_BODY_PART, 50)];

        assert_eq!(map.roll_up(&aggregate)[0].count, 0);
        assert!(map.unmatched(&aggregate).is_empty());
    }

    #[test]
    fn test_roll_up_saturates_large_counts() {
        let half = u64::MAX / 2 + 1;
        let aggregate = vec![
            BodyPartCount::new("Mão", half),
            BodyPartCount::new("Dedos", half),
            BodyPartCount::new("Pé", half),
            BodyPartCount::new("Pé", half),
        ];

        let counts = RegionMap::default().roll_up(&aggregate);
        let hands = counts.iter().find(|c| c.region_id == "hands").unwrap();
        let feet = counts.iter().find(|c| c.region_id == "feet").unwrap();
        assert_eq!(hands.count, u64::MAX);
        assert_eq!(feet.count, u64::MAX);

        let results = heat_results(&counts);
        assert!(results.iter().filter(|r| r.count == u64::MAX).all(|r| r.level == 10));
    }

    #[test]
    fn test_unmatched_labels() {
        let aggregate = vec![BodyPartCount::new("Mão", 1), BodyPartCount::new("Baço", 2)];
        let unmatched = RegionMap::default().unmatched(&aggregate);
        assert_eq!(unmatched, vec![BodyPartCount::new("Baço", 2)]);
    }

    #[test]
    fn test_duplicate_region_rejected() {
        let result = RegionMap::new(vec![
            RegionDefinition::new("hands", &["Mão"]),
            RegionDefinition::new("hands", &["Dedo"]),
        ]);
        assert!(matches!(result, Err(RegionError::DuplicateId(id)) if id == "hands"));
    }

    #[test]
    fn test_heat_results_levels() {
        let counts = vec![
            BodyRegionCount { region_id: "a".into(), raw_labels: vec![], count: 1 },
            BodyRegionCount { region_id: "b".into(), raw_labels: vec![], count: 4 },
            BodyRegionCount { region_id: "c".into(), raw_labels: vec![], count: 0 },
        ];

        let results = heat_results(&counts);
        assert_eq!(results[0].level, 3);
        assert_eq!(results[0].band, Some(HeatBand::Minimal));
        assert_eq!(results[1].level, 10);
        assert_eq!(results[1].percentage, 100.0);
        assert_eq!(results[2].level, 0);
        assert_eq!(results[2].band, None);
    }
}
