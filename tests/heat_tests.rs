use incident_atlas::heat::{heat_level, to_report, HeatBand, HeatLevelCalculator, RegionDefinition, RegionMap};
use incident_atlas::api::types::BodyPartCount;
use incident_atlas::state::Filters;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn compute(pairs: &[(&str, u64)]) -> BTreeMap<String, u8> {
    let counts: BTreeMap<String, u64> = pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    HeatLevelCalculator::new().compute(&counts)
}

fn levels(pairs: &[(&str, u8)]) -> BTreeMap<String, u8> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_documented_examples() {
    assert_eq!(compute(&[]), levels(&[]));
    assert_eq!(compute(&[("a", 0), ("b", 0)]), levels(&[("a", 0), ("b", 0)]));
    assert_eq!(compute(&[("a", 10)]), levels(&[("a", 10)]));
    assert_eq!(compute(&[("a", 1), ("b", 4)]), levels(&[("a", 3), ("b", 10)]));
    assert_eq!(
        compute(&[("a", 5), ("b", 10), ("c", 0)]),
        levels(&[("a", 5), ("b", 10), ("c", 0)])
    );
}

#[test]
fn test_same_keys_and_range() {
    let input = [("head", 3), ("hands", 41), ("feet", 17), ("eyes", 0), ("legs", 29)];
    let result = compute(&input);

    let keys: Vec<&str> = result.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["eyes", "feet", "hands", "head", "legs"]);
    assert!(result.values().all(|level| *level <= 10));
}

#[test]
fn test_zero_iff_zero_count() {
    let result = compute(&[("a", 0), ("b", 1), ("c", 1000)]);
    assert_eq!(result["a"], 0);
    assert!(result["b"] >= 1);
}

#[test]
fn test_max_always_hottest_band() {
    for max in [1u64, 2, 7, 100, 12345] {
        let result = compute(&[("max", max), ("other", max / 3)]);
        assert_eq!(result["max"], 10);
    }
}

#[test]
fn test_monotonic_for_every_max() {
    for max in 1u64..=60 {
        let mut previous = 0;
        for count in 0..=max {
            let level = heat_level(count, max);
            assert!(level >= previous, "count {} of {} dropped to {}", count, max, level);
            previous = level;
        }
    }
}

#[test]
fn test_scale_invariant() {
    for (count, max) in [(1u64, 4u64), (3, 10), (7, 9), (2, 3)] {
        assert_eq!(heat_level(count, max), heat_level(count * 37, max * 37));
    }
}

#[test]
fn test_band_edges_belong_to_lower_band() {
    assert_eq!(HeatBand::from_level(heat_level(25, 100)), Some(HeatBand::Minimal));
    assert_eq!(HeatBand::from_level(heat_level(26, 100)), Some(HeatBand::Low));
    assert_eq!(HeatBand::from_level(heat_level(50, 100)), Some(HeatBand::Low));
    assert_eq!(HeatBand::from_level(heat_level(51, 100)), Some(HeatBand::Medium));
    assert_eq!(HeatBand::from_level(heat_level(75, 100)), Some(HeatBand::Medium));
    assert_eq!(HeatBand::from_level(heat_level(76, 100)), Some(HeatBand::High));
}

#[test]
fn test_report_with_custom_regions() {
    let regions = RegionMap::new(vec![
        RegionDefinition::new("upper", &["Mão", "Braço"]),
        RegionDefinition::new("lower", &["Pé"]),
    ])
    .unwrap();
    let aggregate = vec![
        BodyPartCount::new("Mão", 6),
        BodyPartCount::new("Braço", 2),
        BodyPartCount::new("Pé", 2),
    ];

    let report = to_report("memory", &Filters::new(), &aggregate, &regions);

    let summary: Vec<(&str, u64, u8)> = report
        .regions
        .iter()
        .map(|r| (r.region_id.as_str(), r.count, r.level))
        .collect();
    assert_eq!(summary, vec![("upper", 8, 10), ("lower", 2, 3)]);
    assert_eq!(report.max_count, 8);
}
