//! Levels command: heat levels for counts given on the command line.

use crate::heat::{max_count, HeatBand, HeatLevelCalculator};
use anyhow::{Context, Result};
use log::debug;
use std::collections::BTreeMap;

/// Arguments for the levels command
#[derive(Debug, Clone, Default)]
pub struct LevelsArgs {
    /// `region=count` pairs
    pub pairs: Vec<String>,

    /// Print a JSON object instead of a table
    pub json: bool,
}

/// Parse one `region=count` pair
///
/// Repeated regions are summed by the caller.
pub fn parse_count_pair(pair: &str) -> Result<(String, u64)> {
    let (region, count) = pair
        .split_once('=')
        .with_context(|| format!("Expected region=count, got '{}'", pair))?;

    let region = region.trim();
    if region.is_empty() {
        anyhow::bail!("Region name is empty in '{}'", pair);
    }

    let count = count
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid count for region '{}': '{}'", region, count.trim()))?;

    Ok((region.to_string(), count))
}

/// Execute the levels command
///
/// **Public** - main entry point called from main.rs
pub fn execute_levels(args: LevelsArgs) -> Result<BTreeMap<String, u8>> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for pair in &args.pairs {
        let (region, count) = parse_count_pair(pair)?;
        let total = counts.entry(region.clone()).or_insert(0);
        *total = total
            .checked_add(count)
            .with_context(|| format!("Total count for region '{}' exceeds {}", region, u64::MAX))?;
    }

    debug!("Computing levels for {} regions", counts.len());
    let levels = HeatLevelCalculator::new().compute(&counts);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&levels)?);
    } else {
        let max = max_count(counts.values().copied());
        println!("Max count: {}", max);
        for (region, level) in &levels {
            let count = counts.get(region).copied().unwrap_or(0);
            let band = HeatBand::from_level(*level)
                .map(|b| format!("{} ({})", b, b.color_name()))
                .unwrap_or_else(|| "-".to_string());
            println!("  {:<16} {:>8}  level {:>2}  {}", region, count, level, band);
        }
    }

    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_count_pair() {
        assert_eq!(parse_count_pair("hands=12").unwrap(), ("hands".to_string(), 12));
        assert_eq!(parse_count_pair(" feet = 3 ").unwrap(), ("feet".to_string(), 3));
    }

    #[test]
    fn test_parse_count_pair_errors() {
        assert!(parse_count_pair("hands").is_err());
        assert!(parse_count_pair("=3").is_err());
        assert!(parse_count_pair("hands=-1").is_err());
        assert!(parse_count_pair("hands=many").is_err());
    }

    #[test]
    fn test_execute_levels_sums_repeats() {
        let args = LevelsArgs {
            pairs: vec!["hands=2".into(), "feet=1".into(), "hands=2".into()],
            json: true,
        };

        let levels = execute_levels(args).unwrap();

        let expected: BTreeMap<String, u8> =
            [("feet".to_string(), 3), ("hands".to_string(), 10)].into_iter().collect();
        assert_eq!(levels, expected);
    }

    #[test]
    fn test_execute_levels_rejects_overflowing_total() {
        let args = LevelsArgs {
            pairs: vec![format!("a={}", u64::MAX), "a=1".into()],
            json: true,
        };

        let err = execute_levels(args).unwrap_err();
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn test_execute_levels_max_count() {
        let args = LevelsArgs {
            pairs: vec![format!("a={}", u64::MAX), "b=0".into()],
            json: true,
        };

        let levels = execute_levels(args).unwrap();
        assert_eq!(levels["a"], 10);
        assert_eq!(levels["b"], 0);
    }
}
