//! JSON output writer.
//!
//! Writes heatmap reports and other serializable payloads to JSON files.

use super::{ensure_parent, file_size, validate_path};
use crate::heat::HeatmapReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a heatmap report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &HeatmapReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing heatmap report to: {}", output_path.display());
    write_json(report, output_path)
}

/// Write any serializable value as pretty JSON
pub fn write_json<T: Serialize + ?Sized>(value: &T, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    validate_path(output_path)?;
    ensure_parent(output_path)?;

    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;

    info!("JSON written successfully ({} bytes)", file_size(output_path));
    Ok(())
}

/// Serialize a report to a pretty JSON string
pub fn report_to_string(report: &HeatmapReport) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Read a heatmap report from a JSON file
///
/// **Public** - used by `validate`
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reused for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<HeatmapReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading heatmap report from: {}", input_path.display());

    let file = File::open(input_path)?;
    let report: HeatmapReport = serde_json::from_reader(file)?;

    debug!(
        "Report loaded: version {}, {} regions, source {}",
        report.version,
        report.regions.len(),
        report.source
    );

    Ok(report)
}
