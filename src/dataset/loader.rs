//! Loader for local dataset exports.
//!
//! An export is the JSON array served by `/api/accidents`. Every record is
//! checked for a parseable date so later aggregations can rely on it.

use crate::api::types::{parse_day, Accident};
use crate::utils::error::DatasetError;
use log::{debug, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load and validate a dataset export
///
/// **Public** - main entry point for local data
///
/// # Errors
/// * `DatasetError::Io` - file cannot be read
/// * `DatasetError::JsonError` - not an array of accidents
/// * `DatasetError::InvalidDate` - a record has a date that does not parse
pub fn load_accidents(path: impl AsRef<Path>) -> Result<Vec<Accident>, DatasetError> {
    let path = path.as_ref();
    debug!("Reading dataset from: {}", path.display());

    let file = File::open(path)?;
    let accidents: Vec<Accident> = serde_json::from_reader(BufReader::new(file))?;
    validate_accidents(&accidents)?;

    info!("Loaded {} accidents from {}", accidents.len(), path.display());
    Ok(accidents)
}

/// Parse a dataset export from a string
pub fn parse_accidents(json: &str) -> Result<Vec<Accident>, DatasetError> {
    let accidents: Vec<Accident> = serde_json::from_str(json)?;
    validate_accidents(&accidents)?;
    Ok(accidents)
}

fn validate_accidents(accidents: &[Accident]) -> Result<(), DatasetError> {
    let mut undated = 0;

    for accident in accidents {
        match accident.date.as_deref() {
            Some(value) if parse_day(value).is_none() => {
                return Err(DatasetError::InvalidDate {
                    id: accident.id,
                    value: value.to_string(),
                });
            }
            None => undated += 1,
            _ => {}
        }
    }

    if undated > 0 {
        warn!("{} accidents have no date and will be skipped by date filters", undated);
    }

    Ok(())
}
