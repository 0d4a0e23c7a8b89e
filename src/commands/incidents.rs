//! Incidents command: the paginated incident listing.
//!
//! Pages are pulled through the dashboard state machine, so the listing
//! stops exactly where the dashboard's infinite scroll would.

use super::SourceArgs;
use crate::api::types::Accident;
use crate::output::write_json;
use crate::state::{update, Action, DashboardState, Filters, IncidentFeed};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

/// Arguments for the incidents command
#[derive(Debug, Clone)]
pub struct IncidentsArgs {
    pub source: SourceArgs,

    pub filters: Filters,

    /// Free-text search
    pub search: Option<String>,

    pub per_page: usize,

    /// Stop after this many pages (`None` = until exhausted)
    pub max_pages: Option<usize>,

    /// Also write the loaded incidents as JSON
    pub output: Option<PathBuf>,
}

impl Default for IncidentsArgs {
    fn default() -> Self {
        Self {
            source: SourceArgs::default(),
            filters: Filters::new(),
            search: None,
            per_page: crate::utils::config::DEFAULT_PER_PAGE,
            max_pages: None,
            output: None,
        }
    }
}

/// Execute the incidents command
///
/// **Public** - main entry point called from main.rs
pub fn execute_incidents(args: IncidentsArgs) -> Result<IncidentFeed> {
    if args.per_page == 0 {
        anyhow::bail!("per-page must be greater than 0");
    }

    let source = args.source.open()?;

    let mut state = DashboardState::new(args.filters.clone(), args.per_page);
    if let Some(search) = &args.search {
        state = update(&state, Action::SetSearch(search.clone()));
    }

    let mut loaded_pages = 0;
    while state.incidents.has_more && args.max_pages.map_or(true, |max| loaded_pages < max) {
        let page = state.incidents.page;
        debug!("Requesting incident page {}", page);

        let items = source
            .accidents_page(&state.filters, page, state.incidents.per_page)
            .with_context(|| format!("Failed to fetch incident page {}", page))?;

        state = update(&state, Action::PageLoaded(items));
        loaded_pages += 1;
    }

    info!(
        "Loaded {} incidents in {} pages{}",
        state.incidents.items.len(),
        loaded_pages,
        if state.incidents.has_more { " (more available)" } else { "" }
    );

    for accident in &state.incidents.items {
        println!("{}", format_incident(accident));
    }

    if let Some(path) = &args.output {
        write_json(&state.incidents.items, path).context("Failed to write incidents JSON")?;
        info!("✓ Incidents written to: {}", path.display());
    }

    Ok(state.incidents)
}

/// One listing line
pub fn format_incident(accident: &Accident) -> String {
    let field = |value: &Option<String>| value.as_deref().unwrap_or("-").to_string();
    let date = accident
        .day()
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "#{:<5} {:<10} {:<10} {:<10} {:<6} {:<10} {}",
        accident.id,
        date,
        field(&accident.country),
        field(&accident.local),
        field(&accident.accident_level),
        field(&accident.critical_risk),
        field(&accident.body_part)
    )
}
