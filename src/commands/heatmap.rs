//! Heatmap command implementation.
//!
//! The heatmap command:
//! 1. Opens the data source (API or local dataset)
//! 2. Fetches the body-part aggregate for the filters
//! 3. Loads the region table
//! 4. Computes heat levels
//! 5. Renders the body map
//! 6. Writes output files

use super::SourceArgs;
use crate::heat::{to_report, HeatmapReport, RegionMap};
use crate::output::{validate_path, write_report, write_svg};
use crate::render::{render_body_svg, render_text_summary, BodyMapConfig};
use crate::state::Filters;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the heatmap command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct HeatmapArgs {
    pub source: SourceArgs,

    pub filters: Filters,

    /// Region table JSON (built-in table when `None`)
    pub regions_file: Option<PathBuf>,

    /// Output path for the JSON report
    pub output_json: PathBuf,

    /// Output path for the SVG body map (optional)
    pub output_svg: Option<PathBuf>,

    pub body_map_config: Option<BodyMapConfig>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for HeatmapArgs {
    fn default() -> Self {
        Self {
            source: SourceArgs::default(),
            filters: Filters::new(),
            regions_file: None,
            output_json: PathBuf::from("heatmap.json"),
            output_svg: None,
            body_map_config: None,
            print_summary: false,
        }
    }
}

/// Execute the heatmap command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was written
///
/// # Errors
/// * API or dataset failures
/// * Invalid region table
/// * File write errors
pub fn execute_heatmap(args: HeatmapArgs) -> Result<HeatmapReport> {
    let start_time = Instant::now();

    // Step 1: Open source
    info!("Step 1/6: Opening data source...");
    let source = args.source.open()?;

    // Step 2: Body-part aggregate
    info!("Step 2/6: Fetching body-part aggregate...");
    let aggregate = source
        .body_parts(&args.filters)
        .context("Failed to fetch body-part aggregate")?;

    debug!("Aggregate has {} body-part labels", aggregate.len());

    // Step 3: Region table
    info!("Step 3/6: Loading region table...");
    let regions = match &args.regions_file {
        Some(path) => RegionMap::load(path)
            .with_context(|| format!("Failed to load region table {}", path.display()))?,
        None => RegionMap::default(),
    };

    // Step 4: Heat levels
    info!("Step 4/6: Computing heat levels...");
    let report = to_report(source.describe(), &args.filters, &aggregate, &regions);

    if !report.unmatched_labels.is_empty() {
        warn!(
            "{} body-part labels match no region: {}",
            report.unmatched_labels.len(),
            report
                .unmatched_labels
                .iter()
                .map(|l| l.part.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    if let Some(hottest) = report.hottest() {
        debug!("Hottest region: {} ({} accidents)", hottest.region_id, hottest.count);
    }

    // Step 5: Body map (if requested)
    let svg_content = if args.output_svg.is_some() {
        info!("Step 5/6: Rendering body map...");
        let svg = render_body_svg(&report.regions, args.body_map_config.as_ref())
            .context("Failed to render body map")?;
        Some(svg)
    } else {
        info!("Step 5/6: Skipping body map (not requested)");
        None
    };

    // Step 6: Write outputs
    info!("Step 6/6: Writing output files...");
    write_report(&report, &args.output_json).context("Failed to write heatmap report")?;
    info!("✓ Report written to: {}", args.output_json.display());

    if let (Some(svg), Some(svg_path)) = (svg_content, &args.output_svg) {
        write_svg(&svg, svg_path).context("Failed to write body map SVG")?;
        info!("✓ Body map written to: {}", svg_path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(64));
        println!("HEATMAP SUMMARY");
        println!("{}", "=".repeat(64));
        println!("Source:    {}", report.source);
        println!("Max count: {}", report.max_count);
        println!("\n{}", render_text_summary(&report.regions, true));
        println!("{}", "=".repeat(64));
    }

    info!("Heatmap completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(report)
}

/// Validate heatmap arguments
///
/// **Public** - can be called before execute_heatmap for early validation
pub fn validate_args(args: &HeatmapArgs) -> Result<()> {
    if args.source.input.is_none() {
        if let Some(url) = &args.source.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("API URL must start with http:// or https://");
            }
        }
    }

    if let (Some(start), Some(end)) = (args.filters.start_date, args.filters.end_date) {
        if start > end {
            anyhow::bail!("Start date {} is after end date {}", start, end);
        }
    }

    validate_path(&args.output_json)?;
    if let Some(svg) = &args.output_svg {
        validate_path(svg)?;
    }

    Ok(())
}
