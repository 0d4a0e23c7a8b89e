//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod heatmap;
pub mod incidents;
pub mod levels;
pub mod summary;
pub mod utils;

// Re-export main command functions
pub use heatmap::{execute_heatmap, validate_args, HeatmapArgs};
pub use incidents::{execute_incidents, IncidentsArgs};
pub use levels::{execute_levels, parse_count_pair, LevelsArgs};
pub use summary::{execute_summary, DashboardSummary, SummaryArgs};
pub use utils::{display_schema, display_version, parse_gender, validate_report_file};

use crate::source::DataSource;
use crate::utils::config::DEFAULT_API_URL;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Where a command reads its data from
///
/// A local dataset wins over the API URL when both are given.
#[derive(Debug, Clone, Default)]
pub struct SourceArgs {
    /// Dashboard API base URL
    pub api_url: Option<String>,

    /// Local JSON export of `/api/accidents`
    pub input: Option<PathBuf>,
}

impl SourceArgs {
    pub fn api(url: impl Into<String>) -> Self {
        Self {
            api_url: Some(url.into()),
            input: None,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            api_url: None,
            input: Some(path.into()),
        }
    }

    /// Connect to the API or load the dataset
    pub fn open(&self) -> Result<DataSource> {
        match (&self.input, &self.api_url) {
            (Some(path), _) => {
                info!("Loading dataset: {}", path.display());
                DataSource::local(path).with_context(|| format!("Failed to load dataset {}", path.display()))
            }
            (None, url) => {
                let url = url.as_deref().unwrap_or(DEFAULT_API_URL);
                info!("Dashboard API: {}", url);
                DataSource::remote(url).context("Failed to create API client")
            }
        }
    }
}
