use crate::heat::{heat_level, HeatBand, MAX_HEAT_LEVEL};
use crate::output::read_report;
use crate::state::Gender;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use log::warn;
use std::path::PathBuf;

/// Validate a heatmap report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    if let Some(bad) = report.regions.iter().find(|r| r.level > MAX_HEAT_LEVEL) {
        anyhow::bail!("Region {} has level {} (max {})", bad.region_id, bad.level, MAX_HEAT_LEVEL);
    }

    if let Some(bad) = report.regions.iter().find(|r| r.count > report.max_count) {
        anyhow::bail!(
            "Region {} count {} exceeds max_count {}",
            bad.region_id,
            bad.count,
            report.max_count
        );
    }

    let largest = report.regions.iter().map(|r| r.count).max().unwrap_or(0);
    if largest != report.max_count {
        anyhow::bail!("max_count {} does not match largest region count {}", report.max_count, largest);
    }

    for region in &report.regions {
        let expected = heat_level(region.count, report.max_count);
        if region.level != expected {
            anyhow::bail!(
                "Region {} has level {} but count {} of {} gives level {}",
                region.region_id,
                region.level,
                region.count,
                report.max_count,
                expected
            );
        }
        if region.band != HeatBand::from_level(region.level) {
            anyhow::bail!(
                "Region {} band {:?} does not match level {}",
                region.region_id,
                region.band,
                region.level
            );
        }
    }

    if report.version != SCHEMA_VERSION {
        warn!("Report schema v{} differs from current v{}", report.version, SCHEMA_VERSION);
    }

    println!("✓ Valid heatmap report");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  Max Count: {}", report.max_count);
    println!("  Regions: {}", report.regions.len());
    println!("  Unmatched Labels: {}", report.unmatched_labels.len());
    if let Some(hottest) = report.hottest() {
        println!("  Hottest: {} ({} accidents, level {})", hottest.region_id, hottest.count, hottest.level);
    }

    Ok(())
}

/// Parse a `--gender` value
///
/// Accepts the dataset labels or their English names.
pub fn parse_gender(value: &str) -> Result<Gender, String> {
    if let Some(gender) = Gender::from_label(value.trim()) {
        return Ok(gender);
    }
    match value.trim().to_lowercase().as_str() {
        "male" | "men" | "homem" => Ok(Gender::Male),
        "female" | "women" | "mulher" => Ok(Gender::Female),
        other => Err(format!("unknown gender '{}', expected Homem or Mulher", other)),
    }
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Incident Atlas Heatmap Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string           - Schema version (e.g., '1.0.0')");
        println!("  source: string            - API URL or dataset path");
        println!("  filters: object           - Filters the aggregate was computed with");
        println!("    genders: array          - Male / Female");
        println!("    countries: array        - Selected countries");
        println!("    start_date: string?     - Inclusive start (YYYY-MM-DD)");
        println!("    end_date: string?       - Inclusive end (YYYY-MM-DD)");
        println!("  max_count: number         - Largest region count");
        println!("  regions: array            - One entry per body-map region");
        println!("    region_id: string       - Region id (e.g., 'hands')");
        println!("    count: number           - Accidents in the region");
        println!("    level: number           - Heat level 0-10");
        println!("    percentage: number      - Share of the busiest region");
        println!("    band: string?           - minimal / low / medium / high");
        println!("  unmatched_labels: array   - Body-part labels no region claims");
        println!("  generated_at: string      - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Incident Atlas v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Workplace accident body-map heatmaps and dashboard summaries.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BodyPartCount;
    use crate::heat::{to_report, RegionMap};
    use crate::output::write_report;
    use crate::state::Filters;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_gender() {
        assert_eq!(parse_gender("Homem"), Ok(Gender::Male));
        assert_eq!(parse_gender("female"), Ok(Gender::Female));
        assert!(parse_gender("other").is_err());
    }

    #[test]
    fn test_validate_report_file() {
        let report = to_report(
            "test",
            &Filters::new(),
            &[BodyPartCount::new("Mão", 3)],
            &RegionMap::default(),
        );
        let file = NamedTempFile::new().unwrap();
        write_report(&report, file.path()).unwrap();

        assert!(validate_report_file(file.path().to_path_buf()).is_ok());
    }

    fn write_edited(edit: impl FnOnce(&mut crate::heat::HeatmapReport)) -> NamedTempFile {
        let mut report = to_report(
            "test",
            &Filters::new(),
            &[BodyPartCount::new("Mão", 8), BodyPartCount::new("Pé", 2)],
            &RegionMap::default(),
        );
        edit(&mut report);
        let file = NamedTempFile::new().unwrap();
        write_report(&report, file.path()).unwrap();
        file
    }

    #[test]
    fn test_validate_rejects_inconsistent_level() {
        let file = write_edited(|report| {
            let feet = report.regions.iter_mut().find(|r| r.region_id == "feet").unwrap();
            feet.level = 9;
            feet.band = HeatBand::from_level(9);
        });

        assert!(validate_report_file(file.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_validate_rejects_inconsistent_band() {
        let file = write_edited(|report| {
            let hands = report.regions.iter_mut().find(|r| r.region_id == "hands").unwrap();
            hands.band = Some(HeatBand::Minimal);
        });

        assert!(validate_report_file(file.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_max_count() {
        let file = write_edited(|report| report.max_count = 20);

        assert!(validate_report_file(file.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_level() {
        let mut report = to_report(
            "test",
            &Filters::new(),
            &[BodyPartCount::new("Mão", 3)],
            &RegionMap::default(),
        );
        report.regions[0].level = 11;
        let file = NamedTempFile::new().unwrap();
        write_report(&report, file.path()).unwrap();

        assert!(validate_report_file(file.path().to_path_buf()).is_err());
    }
}
